//! JSON rendering of the nested taxonomy mapping

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};

use crate::application::{ApplicationError, ApplicationResult};

/// File name of the exported hierarchy inside the output directory.
pub const OUTPUT_FILE_NAME: &str = "taxonomy_hierarchy.json";

const INDENT: &[u8] = b"    ";

/// Pretty-print the mapping with 4-space indentation.
///
/// Non-ASCII names are written verbatim as UTF-8. The text has no trailing
/// newline, and the same mapping always renders to the same bytes.
pub fn to_pretty_json(mapping: &Map<String, Value>) -> ApplicationResult<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    mapping
        .serialize(&mut serializer)
        .map_err(|e| ApplicationError::OperationFailed {
            context: "render taxonomy JSON".to_string(),
            source: Box::new(e),
        })?;
    String::from_utf8(buf).map_err(|e| ApplicationError::OperationFailed {
        context: "render taxonomy JSON".to_string(),
        source: Box::new(e),
    })
}
