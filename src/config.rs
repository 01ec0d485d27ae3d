use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default embedding model. MiniLM is small (~23MB) and fast; see
/// `EmbeddingModel::parse_model_name` for the supported alternatives.
const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";
/// Default number of results per query
const DEFAULT_TOP_K: usize = 3;
/// Lines shorter than this are treated as page furniture, not content
const DEFAULT_MIN_LINE_CHARS: usize = 40;
/// Sentence fragments at or under this length are skipped in excerpts
const DEFAULT_MIN_SENTENCE_CHARS: usize = 30;
/// Default sentences per result excerpt
const DEFAULT_MAX_EXCERPT_SENTENCES: usize = 2;
/// Default words per chunk when splitting long text
const DEFAULT_CHUNK_SIZE: usize = 200;
/// Default word overlap between consecutive chunks
const DEFAULT_CHUNK_OVERLAP: usize = 50;

fn default_noise_keywords() -> Vec<String> {
    ["GATE", "LAST MINUTE", "REVISION", "Notes", "Pg.", "Page", "Chapter", "CH."]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Text-cleanup and chunking thresholds for ingestion.
///
/// These are heuristics, not contracts; tune them per corpus.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Minimum characters for a line to count as content
    #[serde(default = "default_min_line_chars")]
    pub min_line_chars: usize,

    /// Lines containing any of these (case-insensitive) are dropped
    #[serde(default = "default_noise_keywords")]
    pub noise_keywords: Vec<String>,

    /// Sentences per result excerpt
    #[serde(default = "default_max_excerpt_sentences")]
    pub max_excerpt_sentences: usize,

    /// Minimum characters for a sentence fragment to count in excerpts
    #[serde(default = "default_min_sentence_chars")]
    pub min_sentence_chars: usize,

    /// Words per chunk when splitting long text
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Word overlap between consecutive chunks
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            min_line_chars: DEFAULT_MIN_LINE_CHARS,
            noise_keywords: default_noise_keywords(),
            max_excerpt_sentences: DEFAULT_MAX_EXCERPT_SENTENCES,
            min_sentence_chars: DEFAULT_MIN_SENTENCE_CHARS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

fn default_min_line_chars() -> usize {
    DEFAULT_MIN_LINE_CHARS
}

fn default_max_excerpt_sentences() -> usize {
    DEFAULT_MAX_EXCERPT_SENTENCES
}

fn default_min_sentence_chars() -> usize {
    DEFAULT_MIN_SENTENCE_CHARS
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_chunk_overlap() -> usize {
    DEFAULT_CHUNK_OVERLAP
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Embedding model name (e.g., "all-MiniLM-L6-v2")
    #[serde(default = "default_model")]
    pub model: String,

    /// Results returned per query when -k is not given
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,

    #[serde(default)]
    pub ingest: IngestConfig,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            default_top_k: DEFAULT_TOP_K,
            ingest: IngestConfig::default(),
            base_path: PathBuf::new(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

impl Config {
    fn validate(&self) {
        if self.model.trim().is_empty() {
            panic!("model must not be empty");
        }

        if self.default_top_k == 0 {
            panic!("default_top_k must be greater than 0");
        }

        let ingest = &self.ingest;
        if ingest.chunk_size == 0 {
            panic!("ingest.chunk_size must be greater than 0");
        }
        if ingest.chunk_overlap >= ingest.chunk_size {
            panic!(
                "ingest.chunk_overlap ({}) must be smaller than ingest.chunk_size ({})",
                ingest.chunk_overlap, ingest.chunk_size
            );
        }
        if ingest.max_excerpt_sentences == 0 {
            panic!("ingest.max_excerpt_sentences must be greater than 0");
        }
    }

    /// Base directory for config and model cache:
    /// `$SEMSEARCH_HOME`, or `~/.config/semsearch`.
    pub fn default_base_path() -> PathBuf {
        if let Ok(home) = std::env::var("SEMSEARCH_HOME") {
            return PathBuf::from(home);
        }

        homedir::my_home()
            .ok()
            .flatten()
            .map(|home| home.join(".config").join("semsearch"))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn load() -> Self {
        Self::load_with(&Self::default_base_path())
    }

    pub fn load_with(base_path: &Path) -> Self {
        let config_path = base_path.join("config.yaml");

        // create new if does not exist
        if !config_path.exists() {
            std::fs::create_dir_all(base_path).expect("cannot create config directory");
            std::fs::write(
                &config_path,
                serde_yml::to_string(&Self::default()).unwrap(),
            )
            .expect("cannot write default config");
        }

        let config_str =
            std::fs::read_to_string(&config_path).expect("config file is not readable");
        let mut config: Self = serde_yml::from_str(&config_str).expect("config is malformed");

        config.base_path = base_path.to_path_buf();

        config.validate();

        // resave in case config version needs an upgrade
        if config_str != serde_yml::to_string(&config).unwrap() {
            config.save();
        }

        config
    }

    pub fn save(&self) {
        let config_path = self.base_path.join("config.yaml");
        let config_str = serde_yml::to_string(&self).unwrap();
        std::fs::write(config_path, config_str).expect("cannot write config");
    }

    /// Directory where downloaded embedding models are cached.
    pub fn cache_dir(&self) -> PathBuf {
        self.base_path.clone()
    }
}
