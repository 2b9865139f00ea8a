use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_answers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub submission_id: i32,
    pub question_id: i32,
    pub selected_answer_id: Option<i32>,
    pub is_correct: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::submissions::Entity",
        from = "Column::SubmissionId",
        to = "super::submissions::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Submissions,
    #[sea_orm(
        belongs_to = "super::questions::Entity",
        from = "Column::QuestionId",
        to = "super::questions::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Questions,
    #[sea_orm(
        belongs_to = "super::question_possible_answers::Entity",
        from = "Column::SelectedAnswerId",
        to = "super::question_possible_answers::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    QuestionPossibleAnswers,
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Questions.def()
    }
}

impl Related<super::question_possible_answers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuestionPossibleAnswers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
