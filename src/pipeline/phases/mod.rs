// Analysis phases, one per progress checkpoint.
//
// Each phase reads what earlier phases left in the AnalysisContext and stores its
// own output there. Phases never talk to progress handlers directly.

#[path = "01_extract.rs"]
pub mod extract;
#[path = "02_scan.rs"]
pub mod scan;
#[path = "03_detect.rs"]
pub mod detect;
#[path = "04_retrieve.rs"]
pub mod retrieve;
#[path = "05_insights.rs"]
pub mod insights;
#[path = "06_synthesize.rs"]
pub mod synthesize;
#[path = "07_assemble.rs"]
pub mod assemble;

pub use assemble::AssemblePhase;
pub use detect::DetectPhase;
pub use extract::ExtractPhase;
pub use insights::InsightsPhase;
pub use retrieve::RetrievePhase;
pub use scan::ScanPhase;
pub use synthesize::SynthesizePhase;
