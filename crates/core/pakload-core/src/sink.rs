//! Sink traits abstracting the loader's two side-effect targets.
//!
//! The external module object and the status display are injected
//! dependencies so the session logic can be exercised against fakes.

use crate::error::LoaderResult;
use serde::{Deserialize, Serialize};

/// Outcome of an entry-point invocation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryPoint {
    /// The module exposed an entry point and it was invoked
    Invoked,
    /// The module does not expose an entry-point capability
    NotExposed,
}

/// Write access to the external module's virtual filesystem and its
/// entry point.
///
/// Implementations wrap the separately-built WebAssembly module's runtime
/// object; tests substitute an in-memory fake.
pub trait AssetSink {
    /// Create or overwrite a virtual file entry.
    ///
    /// `dir` is the parent directory inside the module's filesystem,
    /// `name` the entry name. `create` and `overwrite` map to the module's
    /// creation flags; the loader always passes both as `true`.
    fn write_asset(
        &mut self,
        dir: &str,
        name: &str,
        bytes: &[u8],
        create: bool,
        overwrite: bool,
    ) -> LoaderResult<()>;

    /// Invoke the module's entry point with no arguments, if it exposes
    /// one.
    ///
    /// Only called by the session, and only after a successful
    /// [`write_asset`](Self::write_asset).
    fn invoke_entry_point(&mut self) -> LoaderResult<EntryPoint>;
}

/// A user-visible status indicator.
///
/// Mirrors a text-bearing page element; writing to it cannot fail.
pub trait StatusSink {
    /// Replace the displayed status text.
    fn set_status(&mut self, text: &str);
}
