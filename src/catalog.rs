use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;

static PASSAGE_DIR: Dir = include_dir!("src/passages");

/// One practice text from the fixed catalog. Never mutated after load.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Passage {
    pub title: String,
    pub text: String,
}

/// The fixed, ordered set of passages embedded in the binary.
#[derive(Clone, Debug)]
pub struct Catalog {
    passages: Vec<Passage>,
}

impl Catalog {
    /// Loads the embedded catalog. The passage file ships inside the binary,
    /// so a failure here is a build defect, not a runtime condition.
    pub fn load() -> Self {
        let file = PASSAGE_DIR
            .get_file("passages.json")
            .expect("passage catalog not found");

        let contents = file
            .contents_utf8()
            .expect("unable to interpret passage catalog as a string");

        let passages: Vec<Passage> =
            from_str(contents).expect("unable to deserialize passage catalog json");

        Self { passages }
    }

    pub fn from_passages(passages: Vec<Passage>) -> Self {
        Self { passages }
    }

    pub fn get(&self, index: usize) -> Option<&Passage> {
        self.passages.get(index)
    }

    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Index of the passage after `index`, wrapping at the end of the catalog.
    pub fn next_index(&self, index: usize) -> usize {
        if self.passages.is_empty() {
            0
        } else {
            (index + 1) % self.passages.len()
        }
    }
}
