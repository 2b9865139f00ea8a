use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        admin::{
            AdminUserDetailDto, AdminUserListEntryDto, AnalyticsDto, DailySubmissionsDto,
            DashboardDto, QuizPerformanceDto, RecentSubmissionDto, ScoreBucketDto,
            UserStatsDto, UserSubmissionDto,
        },
        user::UserDto,
    },
    server::{
        data::{
            quiz::{QuizFilter, QuizRepository},
            submission::SubmissionRepository,
            user::UserRepository,
        },
        error::{user::UserError, validation::ValidationError, Error},
        query::{QueryCache, Table},
        service::user::{profile_dto, user_dto},
        util::{
            score::{mean, round2, score_bucket, score_percentage, SCORE_BUCKETS},
            time::{daily_counts, daily_window, start_of_day, DAILY_WINDOW_DAYS},
        },
    },
};

/// Number of submissions shown on the dashboard
pub const RECENT_SUBMISSIONS: u64 = 5;

pub const ROLES: [&str; 2] = ["user", "admin"];

/// Service backing the admin console.
///
/// Each operation loads the rows it needs and aggregates them in a single pass.
pub struct AdminService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a QueryCache,
}

impl<'a> AdminService<'a> {
    /// Creates a new instance of [`AdminService`]
    pub fn new(db: &'a DatabaseConnection, cache: &'a QueryCache) -> Self {
        Self { db, cache }
    }

    /// Totals, mean percentage and the most recent submissions
    pub async fn dashboard(&self) -> Result<DashboardDto, Error> {
        let user_repo = UserRepository::new(self.db);
        let quiz_repo = QuizRepository::new(self.db);
        let submission_repo = SubmissionRepository::new(self.db);

        let total_users = user_repo.count().await?;
        let total_quizzes = quiz_repo.count().await?;
        let published_quizzes = quiz_repo.count_published().await?;

        let submissions = submission_repo.get_all().await?;
        let average_score = round2(mean(
            submissions
                .iter()
                .map(|s| score_percentage(s.score, s.total_possible)),
        ));

        let recent = submission_repo
            .get_recent_with_quiz(RECENT_SUBMISSIONS)
            .await?;
        let user_ids = recent.iter().filter_map(|(s, _)| s.user_id).collect();
        let usernames: HashMap<i32, String> = user_repo
            .get_many(user_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user.username))
            .collect();

        let recent_submissions = recent
            .into_iter()
            .map(|(submission, quiz)| RecentSubmissionDto {
                id: submission.id,
                quiz_title: quiz.map(|quiz| quiz.title).unwrap_or_default(),
                username: submission
                    .user_id
                    .and_then(|user_id| usernames.get(&user_id).cloned()),
                score: submission.score,
                total_possible: submission.total_possible,
                percentage: round2(score_percentage(submission.score, submission.total_possible)),
                completed_at: submission.completed_at,
            })
            .collect();

        Ok(DashboardDto {
            total_users,
            total_quizzes,
            published_quizzes,
            total_submissions: submissions.len() as u64,
            average_score,
            recent_submissions,
        })
    }

    /// Score distribution, daily counts for the window ending `today` and per-quiz performance
    pub async fn analytics(&self, today: NaiveDate) -> Result<AnalyticsDto, Error> {
        let submission_repo = SubmissionRepository::new(self.db);
        let submissions = submission_repo.get_all().await?;

        let mut bucket_counts = [0u64; SCORE_BUCKETS.len()];
        for submission in &submissions {
            let percentage = round2(score_percentage(submission.score, submission.total_possible));
            bucket_counts[score_bucket(percentage)] += 1;
        }
        let score_distribution = SCORE_BUCKETS
            .iter()
            .zip(bucket_counts)
            .map(|((range, _), count)| ScoreBucketDto {
                range: range.to_string(),
                count,
            })
            .collect();

        let window = daily_window(today, DAILY_WINDOW_DAYS)?;
        let since = match window.first() {
            Some(first) => start_of_day(*first)?,
            None => start_of_day(today)?,
        };
        let recent = submission_repo.get_completed_since(since).await?;
        let daily_submissions = daily_counts(&window, recent.iter().map(|s| s.completed_at))
            .into_iter()
            .map(|(date, count)| DailySubmissionsDto { date, count })
            .collect();

        let mut percentages_by_quiz: HashMap<i32, Vec<f64>> = HashMap::new();
        for submission in &submissions {
            percentages_by_quiz
                .entry(submission.quiz_id)
                .or_default()
                .push(score_percentage(submission.score, submission.total_possible));
        }
        let mut quiz_performance: Vec<QuizPerformanceDto> = QuizRepository::new(self.db)
            .get_many(QuizFilter::default())
            .await?
            .into_iter()
            .filter_map(|quiz| {
                let percentages = percentages_by_quiz.remove(&quiz.id)?;
                Some(QuizPerformanceDto {
                    quiz_id: quiz.id,
                    title: quiz.title,
                    attempts: percentages.len() as u64,
                    average_score: round2(mean(percentages)),
                })
            })
            .collect();
        quiz_performance
            .sort_by(|a, b| b.attempts.cmp(&a.attempts).then(a.quiz_id.cmp(&b.quiz_id)));

        Ok(AnalyticsDto {
            score_distribution,
            daily_submissions,
            quiz_performance,
        })
    }

    /// Every user with their stored statistics, newest account first
    pub async fn list_users(&self) -> Result<Vec<AdminUserListEntryDto>, Error> {
        let users = UserRepository::new(self.db).get_all().await?;

        Ok(users
            .iter()
            .map(|user| AdminUserListEntryDto {
                user: user_dto(user),
                quizzes_taken: user.quizzes_taken,
                average_score: user.average_score,
                created_at: user.created_at,
            })
            .collect())
    }

    /// Profile, statistics and submission history of a user.
    ///
    /// # Returns
    /// - `Ok(AdminUserDetailDto)` - User found
    /// - `Err(Error::UserError(UserError::NotFound))` - No user with the ID
    pub async fn user_detail(&self, user_id: i32) -> Result<AdminUserDetailDto, Error> {
        let user = UserRepository::new(self.db)
            .get(user_id)
            .await?
            .ok_or(UserError::NotFound(user_id))?;

        let history = SubmissionRepository::new(self.db)
            .get_by_user_id_with_quiz(user_id)
            .await?;

        let percentages: Vec<f64> = history
            .iter()
            .map(|(s, _)| score_percentage(s.score, s.total_possible))
            .collect();
        let stats = UserStatsDto {
            quizzes_taken: history.len() as u64,
            average_percentage: round2(mean(percentages.iter().copied())),
            best_percentage: round2(percentages.iter().copied().fold(0.0, f64::max)),
        };

        let submissions: Vec<UserSubmissionDto> = history
            .into_iter()
            .map(|(submission, quiz)| UserSubmissionDto {
                id: submission.id,
                quiz_id: submission.quiz_id,
                quiz_title: quiz.map(|quiz| quiz.title).unwrap_or_default(),
                score: submission.score,
                total_possible: submission.total_possible,
                percentage: round2(score_percentage(submission.score, submission.total_possible)),
                time_spent: submission.time_spent,
                completed_at: submission.completed_at,
            })
            .collect();

        Ok(AdminUserDetailDto {
            profile: profile_dto(&user),
            stats,
            submissions,
        })
    }

    /// Changes a user's role to `user` or `admin`
    pub async fn update_role(&self, user_id: i32, role: &str) -> Result<UserDto, Error> {
        let role = role.trim();
        if !ROLES.contains(&role) {
            return Err(ValidationError::InvalidRole(role.to_string()).into());
        }

        let user = UserRepository::new(self.db)
            .update_role(user_id, role)
            .await?
            .ok_or(UserError::NotFound(user_id))?;

        self.cache.invalidate_table(Table::Users);

        tracing::info!(user_id = %user_id, role = %role, "Changed user role");

        Ok(user_dto(&user))
    }
}

#[cfg(test)]
mod tests {
    mod dashboard {
        use quizmaster_test_utils::prelude::*;

        use crate::server::{query::QueryCache, service::admin::AdminService};

        /// Expect totals, the mean percentage and recent submissions with names
        #[tokio::test]
        async fn aggregates_totals() -> Result<(), TestError> {
            let test = test_setup_with_quiz_tables!()?;
            let user = test.user().insert_user(TEST_USER_EMAIL).await?;
            test.user().insert_admin(TEST_ADMIN_EMAIL).await?;
            let quiz = test.quiz().insert_quiz("Capitals", true).await?;
            test.quiz().insert_quiz("Draft", false).await?;
            test.quiz()
                .insert_submission(quiz.id, Some(user.id), 8, 10)
                .await?;
            test.quiz().insert_submission(quiz.id, None, 1, 4).await?;
            let cache = QueryCache::default();

            let dashboard = AdminService::new(&test.db, &cache).dashboard().await.unwrap();

            assert_eq!(dashboard.total_users, 2);
            assert_eq!(dashboard.total_quizzes, 2);
            assert_eq!(dashboard.published_quizzes, 1);
            assert_eq!(dashboard.total_submissions, 2);
            assert_eq!(dashboard.average_score, 52.5);
            assert_eq!(dashboard.recent_submissions.len(), 2);
            let named = dashboard
                .recent_submissions
                .iter()
                .find(|s| s.score == 8)
                .unwrap();
            assert_eq!(named.username.as_deref(), Some("player"));
            assert_eq!(named.quiz_title, "Capitals");

            Ok(())
        }

        /// Expect zeros rather than NaN without submissions
        #[tokio::test]
        async fn handles_empty_database() -> Result<(), TestError> {
            let test = test_setup_with_quiz_tables!()?;
            let cache = QueryCache::default();

            let dashboard = AdminService::new(&test.db, &cache).dashboard().await.unwrap();

            assert_eq!(dashboard.total_submissions, 0);
            assert_eq!(dashboard.average_score, 0.0);
            assert!(dashboard.recent_submissions.is_empty());

            Ok(())
        }
    }

    mod analytics {
        use chrono::{Duration, Utc};
        use quizmaster_test_utils::prelude::*;

        use crate::server::{query::QueryCache, service::admin::AdminService};

        /// Expect buckets, a zero-filled 7 day window and quizzes by attempts
        #[tokio::test]
        async fn aggregates_submissions() -> Result<(), TestError> {
            let test = test_setup_with_quiz_tables!()?;
            let popular = test.quiz().insert_quiz("Capitals", true).await?;
            let other = test.quiz().insert_quiz("Rivers", true).await?;
            test.quiz().insert_quiz("Unplayed", true).await?;
            let now = Utc::now().naive_utc();
            let today = now.date();
            for (quiz_id, score, days_ago) in [
                (popular.id, 10, 0),
                (popular.id, 5, 0),
                (popular.id, 1, 2),
                (other.id, 8, 10),
            ] {
                test.quiz()
                    .insert_submission_at(quiz_id, None, score, 10, now - Duration::days(days_ago))
                    .await?;
            }
            let cache = QueryCache::default();

            let analytics = AdminService::new(&test.db, &cache)
                .analytics(today)
                .await
                .unwrap();

            let buckets: Vec<(&str, u64)> = analytics
                .score_distribution
                .iter()
                .map(|b| (b.range.as_str(), b.count))
                .collect();
            assert_eq!(
                buckets,
                vec![("0-20", 1), ("21-40", 0), ("41-60", 1), ("61-80", 1), ("81-100", 1)]
            );

            let daily: Vec<u64> = analytics.daily_submissions.iter().map(|d| d.count).collect();
            assert_eq!(daily, vec![0, 0, 0, 0, 1, 0, 2]);
            assert_eq!(analytics.daily_submissions[6].date, today);

            assert_eq!(analytics.quiz_performance.len(), 2);
            assert_eq!(analytics.quiz_performance[0].quiz_id, popular.id);
            assert_eq!(analytics.quiz_performance[0].attempts, 3);
            assert_eq!(analytics.quiz_performance[0].average_score, 53.33);
            assert_eq!(analytics.quiz_performance[1].average_score, 80.0);

            Ok(())
        }
    }

    mod user_detail {
        use quizmaster_test_utils::prelude::*;

        use crate::server::{
            error::{user::UserError, Error},
            query::QueryCache,
            service::admin::AdminService,
        };

        /// Expect statistics computed from the user's submissions
        #[tokio::test]
        async fn computes_user_statistics() -> Result<(), TestError> {
            let test = test_setup_with_quiz_tables!()?;
            let user = test.user().insert_user(TEST_USER_EMAIL).await?;
            let quiz = test.quiz().insert_quiz("Capitals", true).await?;
            test.quiz()
                .insert_submission(quiz.id, Some(user.id), 1, 3)
                .await?;
            test.quiz()
                .insert_submission(quiz.id, Some(user.id), 3, 4)
                .await?;
            let cache = QueryCache::default();

            let detail = AdminService::new(&test.db, &cache)
                .user_detail(user.id)
                .await
                .unwrap();

            assert_eq!(detail.stats.quizzes_taken, 2);
            assert_eq!(detail.stats.best_percentage, 75.0);
            assert_eq!(detail.stats.average_percentage, 54.17);
            assert_eq!(detail.submissions[0].quiz_title, "Capitals");

            Ok(())
        }

        /// Expect NotFound for an unknown user
        #[tokio::test]
        async fn fails_for_nonexistent_user() -> Result<(), TestError> {
            let test = test_setup_with_quiz_tables!()?;
            let cache = QueryCache::default();

            let result = AdminService::new(&test.db, &cache).user_detail(1).await;

            assert!(matches!(result, Err(Error::UserError(UserError::NotFound(1)))));

            Ok(())
        }
    }

    mod update_role {
        use quizmaster_test_utils::prelude::*;

        use crate::server::{
            error::{user::UserError, validation::ValidationError, Error},
            query::QueryCache,
            service::admin::AdminService,
        };

        /// Expect the new role to be returned
        #[tokio::test]
        async fn promotes_user() -> Result<(), TestError> {
            let test = test_setup_with_quiz_tables!()?;
            let user = test.user().insert_user(TEST_USER_EMAIL).await?;
            let cache = QueryCache::default();

            let updated = AdminService::new(&test.db, &cache)
                .update_role(user.id, "admin")
                .await
                .unwrap();

            assert_eq!(updated.role, "admin");

            Ok(())
        }

        /// Expect InvalidRole for anything but user or admin, NotFound for unknown users
        #[tokio::test]
        async fn rejects_invalid_requests() -> Result<(), TestError> {
            let test = test_setup_with_quiz_tables!()?;
            let user = test.user().insert_user(TEST_USER_EMAIL).await?;
            let cache = QueryCache::default();
            let admin_service = AdminService::new(&test.db, &cache);

            let invalid_role = admin_service.update_role(user.id, "superuser").await;
            let missing_user = admin_service.update_role(user.id + 1, "admin").await;

            assert!(matches!(
                invalid_role,
                Err(Error::ValidationError(ValidationError::InvalidRole(_)))
            ));
            assert!(matches!(
                missing_user,
                Err(Error::UserError(UserError::NotFound(_)))
            ));

            Ok(())
        }
    }
}
