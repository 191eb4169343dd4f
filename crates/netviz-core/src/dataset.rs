//! The precomputed network snapshot fetched once at startup.

use fnv::FnvHashMap;
use glam::Vec3;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("invalid network data: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Deserialize)]
pub struct Location {
    #[serde(deserialize_with = "id_text")]
    pub id: String,
    pub position: [f32; 3],
    pub community: i64,
    #[serde(default)]
    pub reach: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Community {
    pub id: i64,
    pub position: [f32; 3],
    /// Member (location) count.
    pub size: u32,
    #[serde(default)]
    pub reach: f64,
    #[serde(default)]
    pub retweets: Option<f64>,
    #[serde(default)]
    pub likes: Option<f64>,
    #[serde(default)]
    pub connections: Vec<i64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Edge {
    pub source: [f32; 3],
    pub target: [f32; 3],
    #[serde(default)]
    pub weight: Option<f32>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Dataset {
    pub communities: Vec<Community>,
    pub locations: Vec<Location>,
    pub edges: Vec<Edge>,
}

/// The data file: the dataset plus optional visual parameter overrides.
#[derive(Clone, Debug, Deserialize)]
pub struct NetworkFile {
    #[serde(flatten)]
    pub dataset: Dataset,
    #[serde(default)]
    pub threejs_params: Option<Value>,
}

impl NetworkFile {
    pub fn from_json(text: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DatasetStats {
    pub communities: usize,
    pub locations: usize,
    pub edges: usize,
}

impl Dataset {
    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            communities: self.communities.len(),
            locations: self.locations.len(),
            edges: self.edges.len(),
        }
    }

    /// Community id to index into `communities`. The first occurrence of a
    /// repeated id wins.
    pub fn community_index(&self) -> FnvHashMap<i64, usize> {
        let mut index = FnvHashMap::default();
        for (i, c) in self.communities.iter().enumerate() {
            index.entry(c.id).or_insert(i);
        }
        index
    }
}

impl Location {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

impl Community {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

impl Edge {
    pub fn segment(&self) -> [Vec3; 2] {
        [Vec3::from_array(self.source), Vec3::from_array(self.target)]
    }
}

// The exporter writes location ids as strings; accept plain numbers too.
fn id_text<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }
    Ok(match RawId::deserialize(de)? {
        RawId::Text(s) => s,
        RawId::Int(i) => i.to_string(),
        RawId::Float(f) => f.to_string(),
    })
}
