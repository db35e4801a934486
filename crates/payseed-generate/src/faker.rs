use fake::Fake;
use fake::faker::company::en::{CatchPhrase, CompanyName};
use fake::faker::job::en::Title;
use fake::faker::name::en::Name;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded source of filler text (names, job titles, company names).
///
/// Each record draws from its own RNG, seeded from the run seed, a stream
/// name and the record index, so a record's text never depends on how many
/// other records were generated before it.
#[derive(Debug, Clone, Copy)]
pub struct TextFaker {
    seed: u64,
}

impl TextFaker {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// RNG for record `index` of `stream`.
    pub fn record(&self, stream: &str, index: u64) -> RecordText {
        let seed = hash_index_seed(hash_seed(self.seed, stream), index);
        RecordText {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

/// Text drawn for a single record; call order is part of the output.
pub struct RecordText {
    rng: ChaCha8Rng,
}

impl RecordText {
    pub fn person_name(&mut self) -> String {
        Name().fake_with_rng(&mut self.rng)
    }

    pub fn job_title(&mut self) -> String {
        Title().fake_with_rng(&mut self.rng)
    }

    pub fn company_name(&mut self) -> String {
        CompanyName().fake_with_rng(&mut self.rng)
    }

    pub fn catch_phrase(&mut self) -> String {
        CatchPhrase().fake_with_rng(&mut self.rng)
    }
}

fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

fn hash_index_seed(stream_seed: u64, index: u64) -> u64 {
    let hash = stream_seed ^ index.wrapping_mul(0x9e3779b97f4a7c15);
    hash.wrapping_mul(0x100000001b3)
}
