pub mod llm;
pub mod table;
pub mod progress;
#[cfg(feature = "terminal_printing")]
pub mod printing;
pub mod timing;

use serde_json::{Map, Value};

pub type JsonMap = Map<String, Value>;
