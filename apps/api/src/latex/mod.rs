// Resume typesetting: CV record → LaTeX source, plus the PDF hand-off.
// Everything except `handlers` is pure and synchronous.

pub mod compiler;
pub mod escape;
pub mod handlers;
pub mod preamble;

pub use compiler::compile_resume;
