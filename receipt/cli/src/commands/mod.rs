mod dump;
mod inspect;

pub use self::dump::DumpCommand;
pub use self::inspect::InspectCommand;
