//! Gradient-boosted tree ensemble loaded from an XGBoost JSON model.
//!
//! Only the pieces needed for multi-class inference are read:
//! - `learner.gradient_booster.model.trees` and `tree_info` (tree -> class)
//! - `learner.learner_model_param` (`base_score`, `num_class`, `num_feature`)
//! - `learner.objective.name`
//! - `learner.feature_names` (optional, may be supplied by config instead)
//!
//! Each tree is stored as parallel node arrays. A node is a leaf when its
//! left child is `-1`, and the leaf weight lives in `split_conditions`.
//! A missing value (`NaN`) follows `default_left`; otherwise the walk goes
//! left iff `value < split_condition`.

use serde::{Deserialize, Deserializer};
use std::path::Path;

use super::error::ModelError;
use crate::models::FeatureMatrix;

/// Inference seam between the classification service and the tree model
pub trait CategoryModel: Send + Sync {
    /// Feature names in column order
    fn feature_names(&self) -> &[String];

    fn num_class(&self) -> usize;

    fn num_trees(&self) -> usize;

    /// Predicted class id for every row, in row order
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<u32>, ModelError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// Emits the argmax class id
    MultiSoftmax,
    /// Emits per-class probabilities; the class id is still the argmax
    MultiSoftprob,
}

impl Objective {
    fn parse(name: &str) -> Result<Self, ModelError> {
        match name {
            "multi:softmax" => Ok(Objective::MultiSoftmax),
            "multi:softprob" => Ok(Objective::MultiSoftprob),
            other => Err(ModelError::UnsupportedObjective(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum TreeNode {
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
        default_left: bool,
    },
    Leaf {
        value: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Walk from the root to a leaf and return its weight
    pub fn leaf_value(&self, row: &[f32]) -> f32 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    default_left,
                } => {
                    let x = row[*feature];
                    index = if x.is_nan() {
                        if *default_left {
                            *left
                        } else {
                            *right
                        }
                    } else if x < *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    fn from_doc(tree_id: usize, doc: TreeDoc, num_feature: usize) -> Result<Self, ModelError> {
        let n = doc.left_children.len();
        let invalid = |msg: &str| ModelError::Invalid(format!("tree {}: {}", tree_id, msg));

        if n == 0 {
            return Err(invalid("has no nodes"));
        }
        if doc.right_children.len() != n
            || doc.split_indices.len() != n
            || doc.split_conditions.len() != n
            || doc.default_left.len() != n
        {
            return Err(invalid("node arrays have inconsistent lengths"));
        }
        if doc.split_type.iter().any(|&t| t != 0) {
            return Err(invalid("categorical splits are not supported"));
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let left = doc.left_children[i];
            if left == -1 {
                nodes.push(TreeNode::Leaf {
                    value: doc.split_conditions[i],
                });
                continue;
            }

            let right = doc.right_children[i];
            // Children are allocated after their parent, which also rules out cycles.
            let child = |c: i32| -> Result<usize, ModelError> {
                if c <= i as i32 || c as usize >= n {
                    Err(invalid(&format!("node {} has out-of-range child {}", i, c)))
                } else {
                    Ok(c as usize)
                }
            };
            let feature = doc.split_indices[i] as usize;
            if feature >= num_feature {
                return Err(invalid(&format!(
                    "node {} splits on feature {} but the model has {} features",
                    i, feature, num_feature
                )));
            }

            nodes.push(TreeNode::Split {
                feature,
                threshold: doc.split_conditions[i],
                left: child(left)?,
                right: child(right)?,
                default_left: doc.default_left[i],
            });
        }

        Ok(Self { nodes })
    }
}

/// Multi-class tree ensemble
#[derive(Debug, Clone)]
pub struct TreeEnsemble {
    trees: Vec<RegressionTree>,
    tree_class: Vec<usize>,
    base_margin: Vec<f32>,
    num_class: usize,
    feature_names: Vec<String>,
    objective: Objective,
}

impl TreeEnsemble {
    /// Load a model file, using `fallback_features` when the file carries no names
    pub fn load(
        path: impl AsRef<Path>,
        fallback_features: Option<Vec<String>>,
    ) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw, fallback_features)
    }

    pub fn from_json_str(
        raw: &str,
        fallback_features: Option<Vec<String>>,
    ) -> Result<Self, ModelError> {
        let doc: ModelDocument = serde_json::from_str(raw)?;
        Self::from_document(doc, fallback_features)
    }

    fn from_document(
        doc: ModelDocument,
        fallback_features: Option<Vec<String>>,
    ) -> Result<Self, ModelError> {
        let learner = doc.learner;
        let objective = Objective::parse(&learner.objective.name)?;

        if learner.gradient_booster.name != "gbtree" {
            return Err(ModelError::Invalid(format!(
                "unsupported booster `{}`",
                learner.gradient_booster.name
            )));
        }
        let model = learner
            .gradient_booster
            .model
            .ok_or_else(|| ModelError::Invalid("gradient_booster.model is missing".to_string()))?;

        let params = &learner.learner_model_param;
        let num_class: usize = parse_param("num_class", &params.num_class)?;
        if num_class < 2 {
            return Err(ModelError::Invalid(format!(
                "num_class must be at least 2, got {}",
                num_class
            )));
        }

        let feature_names = if !learner.feature_names.is_empty() {
            learner.feature_names
        } else {
            fallback_features.ok_or(ModelError::MissingFeatureNames)?
        };
        let num_feature = match params.num_feature.as_deref() {
            Some(raw) => parse_param("num_feature", raw)?,
            None => feature_names.len(),
        };
        if feature_names.len() != num_feature {
            return Err(ModelError::Invalid(format!(
                "model has {} features but {} feature names",
                num_feature,
                feature_names.len()
            )));
        }

        let base_margin = parse_base_score(&params.base_score, num_class)?;

        if model.tree_info.len() != model.trees.len() {
            return Err(ModelError::Invalid(format!(
                "tree_info has {} entries for {} trees",
                model.tree_info.len(),
                model.trees.len()
            )));
        }
        let tree_class = model
            .tree_info
            .iter()
            .map(|&class| {
                let class = class as usize;
                if class >= num_class {
                    Err(ModelError::Invalid(format!(
                        "tree assigned to class {} but num_class is {}",
                        class, num_class
                    )))
                } else {
                    Ok(class)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let trees = model
            .trees
            .into_iter()
            .enumerate()
            .map(|(id, tree)| RegressionTree::from_doc(id, tree, num_feature))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            trees,
            tree_class,
            base_margin,
            num_class,
            feature_names,
            objective,
        })
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Raw per-class margins (sum of leaf weights plus base score) for one row
    pub fn margins(&self, row: &[f32]) -> Result<Vec<f32>, ModelError> {
        if row.len() != self.feature_names.len() {
            return Err(ModelError::FeatureCount {
                expected: self.feature_names.len(),
                got: row.len(),
            });
        }
        let mut margins = self.base_margin.clone();
        for (tree, &class) in self.trees.iter().zip(&self.tree_class) {
            margins[class] += tree.leaf_value(row);
        }
        Ok(margins)
    }

    /// Per-class probabilities for one row
    pub fn predict_proba(&self, row: &[f32]) -> Result<Vec<f32>, ModelError> {
        let margins = self.margins(row)?;
        let max = margins.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let exps: Vec<f32> = margins.iter().map(|m| (m - max).exp()).collect();
        let sum: f32 = exps.iter().sum();
        Ok(exps.into_iter().map(|e| e / sum).collect())
    }

    pub fn predict_row(&self, row: &[f32]) -> Result<u32, ModelError> {
        let margins = self.margins(row)?;
        Ok(argmax(&margins) as u32)
    }
}

impl CategoryModel for TreeEnsemble {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn num_class(&self) -> usize {
        self.num_class
    }

    fn num_trees(&self) -> usize {
        self.trees.len()
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<u32>, ModelError> {
        if features.n_features() != self.feature_names.len() {
            return Err(ModelError::FeatureCount {
                expected: self.feature_names.len(),
                got: features.n_features(),
            });
        }
        features.rows().map(|row| self.predict_row(row)).collect()
    }
}

/// Index of the largest value; ties resolve to the lowest index
fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

fn parse_param<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, ModelError> {
    raw.trim()
        .parse()
        .map_err(|_| ModelError::Invalid(format!("{} `{}` is not a valid number", name, raw)))
}

/// `base_score` is either a scalar (`"5E-1"`) or, in newer releases, a
/// bracketed list with one entry per class (`"[5E-1]"`, `"[1E-1,2E-1,...]"`).
fn parse_base_score(raw: &str, num_class: usize) -> Result<Vec<f32>, ModelError> {
    let trimmed = raw.trim().trim_start_matches('[').trim_end_matches(']');
    let values = trimmed
        .split(',')
        .map(|v| parse_param::<f32>("base_score", v))
        .collect::<Result<Vec<_>, _>>()?;

    match values.len() {
        1 => Ok(vec![values[0]; num_class]),
        n if n == num_class => Ok(values),
        n => Err(ModelError::Invalid(format!(
            "base_score has {} entries for {} classes",
            n, num_class
        ))),
    }
}

#[derive(Debug, Deserialize)]
struct ModelDocument {
    learner: LearnerDoc,
}

#[derive(Debug, Deserialize)]
struct LearnerDoc {
    #[serde(default)]
    feature_names: Vec<String>,
    gradient_booster: GradientBoosterDoc,
    learner_model_param: LearnerModelParamDoc,
    objective: ObjectiveDoc,
}

#[derive(Debug, Deserialize)]
struct GradientBoosterDoc {
    name: String,
    model: Option<GbTreeModelDoc>,
}

#[derive(Debug, Deserialize)]
struct GbTreeModelDoc {
    trees: Vec<TreeDoc>,
    tree_info: Vec<u32>,
}

#[derive(Debug, Deserialize)]
struct LearnerModelParamDoc {
    #[serde(default = "default_base_score")]
    base_score: String,
    num_class: String,
    num_feature: Option<String>,
}

fn default_base_score() -> String {
    "5E-1".to_string()
}

#[derive(Debug, Deserialize)]
struct ObjectiveDoc {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TreeDoc {
    left_children: Vec<i32>,
    right_children: Vec<i32>,
    split_indices: Vec<u32>,
    split_conditions: Vec<f32>,
    #[serde(deserialize_with = "bool_or_int_vec")]
    default_left: Vec<bool>,
    #[serde(default)]
    split_type: Vec<u8>,
}

/// Older writers emit `default_left` as booleans, newer ones as 0/1
fn bool_or_int_vec<'de, D>(deserializer: D) -> Result<Vec<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(u8),
    }

    let flags = Vec::<Flag>::deserialize(deserializer)?;
    Ok(flags
        .into_iter()
        .map(|f| match f {
            Flag::Bool(b) => b,
            Flag::Int(i) => i != 0,
        })
        .collect())
}
