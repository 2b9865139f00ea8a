//! Constant values shared by fixtures and tests.

/// Email of the regular user created by [`UserFixtures::insert_user`](crate::fixtures::user::UserFixtures::insert_user)
/// when tests don't need a specific address.
pub static TEST_USER_EMAIL: &str = "player@example.com";

/// Email of the admin created by [`UserFixtures::insert_admin`](crate::fixtures::user::UserFixtures::insert_admin).
pub static TEST_ADMIN_EMAIL: &str = "admin@example.com";

/// Plain-text password every fixture user is created with.
pub static TEST_PASSWORD: &str = "correct horse battery staple";

/// Fixed salt so fixture password hashes are deterministic.
pub(crate) static TEST_PASSWORD_SALT: &[u8] = b"quizmaster-test-salt";
