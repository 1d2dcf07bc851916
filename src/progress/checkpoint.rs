/// The fixed progress checkpoints of an analysis run, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Checkpoint {
    Extract,
    Parse,
    Detect,
    Retrieve,
    ExtractInsights,
    Synthesize,
    Build,
    Done,
}

impl Checkpoint {
    pub const ALL: [Checkpoint; 8] = [
        Checkpoint::Extract,
        Checkpoint::Parse,
        Checkpoint::Detect,
        Checkpoint::Retrieve,
        Checkpoint::ExtractInsights,
        Checkpoint::Synthesize,
        Checkpoint::Build,
        Checkpoint::Done,
    ];

    pub fn percent(self) -> u8 {
        match self {
            Checkpoint::Extract => 10,
            Checkpoint::Parse => 20,
            Checkpoint::Detect => 30,
            Checkpoint::Retrieve => 40,
            Checkpoint::ExtractInsights => 60,
            Checkpoint::Synthesize => 75,
            Checkpoint::Build => 90,
            Checkpoint::Done => 100,
        }
    }

    pub fn status(self) -> &'static str {
        match self {
            Checkpoint::Extract => "Extracting files...",
            Checkpoint::Parse => "Parsing codebase...",
            Checkpoint::Detect => "Detecting GenAI techniques...",
            Checkpoint::Retrieve => "Retrieving research papers...",
            Checkpoint::ExtractInsights => "Extracting insights from papers...",
            Checkpoint::Synthesize => "Generating recommendations...",
            Checkpoint::Build => "Building final report...",
            Checkpoint::Done => "Analysis complete!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentages_strictly_increase() {
        for pair in Checkpoint::ALL.windows(2) {
            assert!(pair[0].percent() < pair[1].percent());
        }
        assert_eq!(Checkpoint::Done.percent(), 100);
    }
}
