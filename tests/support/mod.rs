#![allow(dead_code)]

use flate2::write::GzEncoder;
use flate2::Compression;
use litscout::insights::{ExtractionConfig, InsightExtractor};
use litscout::literature::{LiteratureRetriever, MockPaperSource, RetrievalConfig};
use litscout::llm::{LLMClient, MockLLMClient};
use litscout::pipeline::{PipelineConfig, PipelineContext};
use litscout::progress::{ProgressEvent, ProgressHandler};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Packs a fixture directory into `dest` as a gzip tarball.
pub fn pack_fixture(name: &str, dest: &Path) {
    let file = File::create(dest).unwrap();
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.append_dir_all(".", fixture(name)).unwrap();
    builder.into_inner().unwrap().finish().unwrap();
}

/// Packs a fixture directory into `dest` as a zip file.
pub fn zip_fixture(name: &str, dest: &Path) {
    fn add_dir(writer: &mut zip::ZipWriter<File>, dir: &Path, prefix: &str) {
        let mut entries: Vec<_> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        entries.sort();
        for path in entries {
            let name = format!("{}{}", prefix, path.file_name().unwrap().to_str().unwrap());
            if path.is_dir() {
                add_dir(writer, &path, &format!("{}/", name));
            } else {
                writer
                    .start_file(name, zip::write::SimpleFileOptions::default())
                    .unwrap();
                writer.write_all(&std::fs::read(&path).unwrap()).unwrap();
            }
        }
    }

    let mut writer = zip::ZipWriter::new(File::create(dest).unwrap());
    add_dir(&mut writer, &fixture(name), "");
    writer.finish().unwrap();
}

pub fn services(
    source: Arc<MockPaperSource>,
    llm: Option<Arc<MockLLMClient>>,
    config: PipelineConfig,
) -> Arc<PipelineContext> {
    let retriever = LiteratureRetriever::new(source, RetrievalConfig::default());
    let extractor = InsightExtractor::new(
        llm.map(|client| client as Arc<dyn LLMClient>),
        ExtractionConfig::default(),
    );
    Arc::new(PipelineContext::new(retriever, extractor, config))
}

#[derive(Default)]
pub struct RecordingHandler {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingHandler {
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn percents(&self) -> Vec<u8> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ProgressEvent::Checkpoint { percent, .. } => Some(percent),
                _ => None,
            })
            .collect()
    }
}

impl ProgressHandler for RecordingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
