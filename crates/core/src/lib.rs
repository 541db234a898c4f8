pub mod lenient;
pub mod money;
pub mod record;

pub use lenient::Lenient;
pub use money::Money;
pub use record::YnabRecord;
