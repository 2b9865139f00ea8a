pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod model;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        constant::{TEST_ADMIN_EMAIL, TEST_PASSWORD, TEST_USER_EMAIL},
        test_setup_with_quiz_tables, test_setup_with_tables, TestBuilder, TestContext, TestError,
    };
}
