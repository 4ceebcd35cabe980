//! Document roots.
//!
//! Rule paths such as `.spec.domain.machine.type` address the VM *instance
//! template*, not the `VirtualMachine` object wrapping it.

use serde_json::Value;

/// The object rule paths are evaluated against.
///
/// For a `VirtualMachine` this is `spec.template`; any other document,
/// including a bare instance template, is returned unchanged.
pub fn template_root(document: &Value) -> &Value {
    let is_vm = document.get("kind").and_then(Value::as_str) == Some("VirtualMachine");
    match document.pointer("/spec/template") {
        Some(template) if is_vm => template,
        _ => document,
    }
}
