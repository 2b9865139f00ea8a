use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub quiz_id: i32,
    pub question_text: String,
    pub question_type: String,
    pub points: i32,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quizzes::Entity",
        from = "Column::QuizId",
        to = "super::quizzes::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Quizzes,
    #[sea_orm(has_many = "super::question_possible_answers::Entity")]
    QuestionPossibleAnswers,
    #[sea_orm(has_many = "super::user_answers::Entity")]
    UserAnswers,
}

impl Related<super::quizzes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quizzes.def()
    }
}

impl Related<super::question_possible_answers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuestionPossibleAnswers.def()
    }
}

impl Related<super::user_answers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserAnswers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
