pub mod fixtures;
pub mod test_home;

#[allow(unused_imports)]
pub use fixtures::*;
pub use test_home::TestHomeGuard;
