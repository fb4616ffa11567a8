use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::error::{ModelError, PredictError};
use crate::types::{FeatureRecord, FeatureValue, COL_COUNTRY, NUMERIC_COLUMNS};

/// Anything that can classify one record into a category label.
///
/// Implementations must be side-effect free: the same record always
/// yields the same label, and one instance is shared across sessions.
pub trait Predictor: Send + Sync {
    fn predict(&self, record: &FeatureRecord) -> Result<String, PredictError>;

    fn name(&self) -> &str {
        "predictor"
    }
}

// ---------- Artifact format ----------

#[derive(Deserialize)]
struct PipelineJson {
    #[serde(default = "default_model_name")]
    model_name: String,
    numeric_features: Vec<String>,
    categorical_feature: String,
    categories: Vec<String>,
    classes: Vec<String>,
    tree: TreeJson,
}

// sklearn-style parallel arrays; leaves have feature < 0.
#[derive(Deserialize)]
struct TreeJson {
    feature: Vec<i32>,
    threshold: Vec<f64>,
    left: Vec<i32>,
    right: Vec<i32>,
    value: Vec<Option<usize>>,
}

fn default_model_name() -> String {
    "dt_pipeline".to_string()
}

#[derive(Debug, Clone)]
struct TreeNode {
    feature: i32,
    threshold: f64,
    left: i32,
    right: i32,
    class: Option<usize>,
}

impl TreeNode {
    const fn is_leaf(&self) -> bool {
        self.feature < 0
    }
}

/// Decision-tree pipeline: numeric passthrough plus one-hot country,
/// feeding a single classification tree.
#[derive(Debug, Clone)]
pub struct DecisionTreePipeline {
    name: String,
    categorical_feature: String,
    categories: Vec<String>,
    classes: Vec<String>,
    nodes: Vec<TreeNode>,
}

impl DecisionTreePipeline {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let txt = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: PipelineJson = serde_json::from_str(&txt).map_err(|source| ModelError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_parts(raw)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let raw: PipelineJson = serde_json::from_str(json)
            .map_err(|e| ModelError::Invalid(format!("malformed JSON: {e}")))?;
        Self::from_parts(raw)
    }

    fn from_parts(raw: PipelineJson) -> Result<Self, ModelError> {
        if raw.numeric_features != NUMERIC_COLUMNS {
            return Err(ModelError::Invalid(format!(
                "numeric features {:?} do not match {:?}",
                raw.numeric_features, NUMERIC_COLUMNS
            )));
        }
        if raw.categorical_feature != COL_COUNTRY {
            return Err(ModelError::Invalid(format!(
                "categorical feature '{}' is not '{}'",
                raw.categorical_feature, COL_COUNTRY
            )));
        }
        if raw.classes.is_empty() {
            return Err(ModelError::Invalid("no classes".into()));
        }

        let t = raw.tree;
        let n = t.feature.len();
        if n == 0 {
            return Err(ModelError::Invalid("empty tree".into()));
        }
        if t.threshold.len() != n || t.left.len() != n || t.right.len() != n || t.value.len() != n {
            return Err(ModelError::Invalid("inconsistent tree array lengths".into()));
        }

        let in_dim = NUMERIC_COLUMNS.len() + raw.categories.len();
        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let node = TreeNode {
                feature: t.feature[i],
                threshold: t.threshold[i],
                left: t.left[i],
                right: t.right[i],
                class: t.value[i],
            };
            if node.is_leaf() {
                match node.class {
                    Some(c) if c < raw.classes.len() => {}
                    other => {
                        return Err(ModelError::Invalid(format!(
                            "leaf {i} has class {other:?}, model has {} classes",
                            raw.classes.len()
                        )))
                    }
                }
            } else {
                if node.feature as usize >= in_dim {
                    return Err(ModelError::Invalid(format!(
                        "node {i} splits on feature {} but input has {in_dim}",
                        node.feature
                    )));
                }
                for child in [node.left, node.right] {
                    if child <= 0 || child as usize >= n {
                        return Err(ModelError::Invalid(format!("node {i} has child {child}")));
                    }
                }
            }
            nodes.push(node);
        }

        Ok(Self {
            name: raw.model_name,
            categorical_feature: raw.categorical_feature,
            categories: raw.categories,
            classes: raw.classes,
            nodes,
        })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn in_dim(&self) -> usize {
        NUMERIC_COLUMNS.len() + self.categories.len()
    }

    /// Numeric columns first, then one indicator per known category.
    fn encode(&self, record: &FeatureRecord) -> Result<Vec<f64>, PredictError> {
        let mut x = Vec::with_capacity(self.in_dim());
        for col in NUMERIC_COLUMNS {
            match record.get(col) {
                Some(FeatureValue::Int(v)) => x.push(*v as f64),
                Some(FeatureValue::Text(_)) => {
                    return Err(PredictError::ColumnType {
                        column: col.to_string(),
                        expected: "an integer",
                    })
                }
                None => return Err(PredictError::MissingColumn(col.to_string())),
            }
        }

        let value = match record.get(&self.categorical_feature) {
            Some(FeatureValue::Text(s)) => s,
            Some(FeatureValue::Int(_)) => {
                return Err(PredictError::ColumnType {
                    column: self.categorical_feature.clone(),
                    expected: "a string",
                })
            }
            None => return Err(PredictError::MissingColumn(self.categorical_feature.clone())),
        };
        let hot = self
            .categories
            .iter()
            .position(|c| c == value)
            .ok_or_else(|| PredictError::UnknownCategory {
                column: self.categorical_feature.clone(),
                value: value.clone(),
            })?;
        x.extend((0..self.categories.len()).map(|i| if i == hot { 1.0 } else { 0.0 }));
        Ok(x)
    }

    fn traverse(&self, x: &[f64]) -> Result<usize, PredictError> {
        let mut idx = 0usize;
        // A well-formed tree reaches a leaf in fewer steps than it has nodes.
        for _ in 0..=self.nodes.len() {
            let node = self.nodes.get(idx).ok_or(PredictError::BrokenTree(idx))?;
            if node.is_leaf() {
                return node.class.ok_or(PredictError::BrokenTree(idx));
            }
            let v = x.get(node.feature as usize).copied().unwrap_or(0.0);
            let next = if v <= node.threshold { node.left } else { node.right };
            if next < 0 {
                return Err(PredictError::BrokenTree(idx));
            }
            idx = next as usize;
        }
        Err(PredictError::Cycle)
    }
}

impl Predictor for DecisionTreePipeline {
    fn predict(&self, record: &FeatureRecord) -> Result<String, PredictError> {
        let x = self.encode(record)?;
        let class = self.traverse(&x)?;
        self.classes
            .get(class)
            .cloned()
            .ok_or_else(|| PredictError::Other(format!("class index {class} out of range")))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ---------- Loader ----------

/// Result of trying to load the artifact at startup.
#[derive(Clone)]
pub enum ModelHandle {
    Ready(Arc<dyn Predictor>),
    Unavailable { path: PathBuf, reason: String },
}

impl ModelHandle {
    pub fn predictor(&self) -> Option<&Arc<dyn Predictor>> {
        match self {
            ModelHandle::Ready(p) => Some(p),
            ModelHandle::Unavailable { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ModelHandle::Ready(_))
    }

    pub fn name(&self) -> Option<&str> {
        self.predictor().map(|p| p.name())
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelHandle::Ready(p) => f.debug_tuple("Ready").field(&p.name()).finish(),
            ModelHandle::Unavailable { path, reason } => f
                .debug_struct("Unavailable")
                .field("path", path)
                .field("reason", reason)
                .finish(),
        }
    }
}

/// Loads the pipeline once. A missing or unreadable artifact is reported as
/// `Unavailable`, never as a panic.
pub fn load(path: impl AsRef<Path>) -> ModelHandle {
    let path = path.as_ref();
    match DecisionTreePipeline::from_path(path) {
        Ok(p) => {
            tracing::info!(
                "loaded model '{}' from {}; nodes={} in_dim={} classes={:?}",
                p.name(),
                path.display(),
                p.n_nodes(),
                p.in_dim(),
                p.classes()
            );
            ModelHandle::Ready(Arc::new(p))
        }
        Err(e) => {
            tracing::warn!("model unavailable: {e}");
            ModelHandle::Unavailable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        }
    }
}
