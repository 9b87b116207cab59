pub mod prettyprint;

pub use prettyprint::PrettyFormatter;
