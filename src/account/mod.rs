mod local_account;
mod numeric_resolver;

pub use local_account::LocalAccount;
pub use numeric_resolver::NumericResolver;
