/*!
 * Macro substitution engine for SQL migration pre/post-processing.
 *
 * Before a batch of SQL files is handed to the translation engine, configured
 * literal tokens ("macros") are replaced with concrete values; once translated
 * output comes back, the replacement is reversed so the original tokens
 * reappear in the final SQL. The module is split into several submodules:
 *
 * - `table`: macro map data model and YAML loader
 * - `matcher`: glob-based resolution of which macro sets apply to a file
 * - `engine`: the forward and reverse literal substitution passes
 * - `reverse`: reverse map construction with collision detection
 * - `report`: per-file and per-batch substitution diagnostics
 * - `processor`: facade tying resolution and both passes together
 */

// Re-export main types for easier usage
pub use self::engine::{Replacement, SubstitutionEngine, SubstitutionResult};
pub use self::matcher::PatternMatcher;
pub use self::processor::MacroProcessor;
pub use self::report::{FileReport, KeyCount, SubstitutionReport};
pub use self::reverse::{Collision, ReverseEntry, ReverseMacroSet};
pub use self::table::{Macro, MacroSet, MacroTable};

// Submodules
pub mod engine;
pub mod matcher;
pub mod processor;
pub mod report;
pub mod reverse;
pub mod table;
