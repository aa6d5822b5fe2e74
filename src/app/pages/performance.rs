//! Model performance page: the training-time evaluation loaded from the
//! metrics sidecar written next to the model artifact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ports::Storage;
use crate::utils::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_negatives: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
    pub true_positives: u64,
}

impl ConfusionMatrix {
    pub fn total(&self) -> u64 {
        self.true_negatives + self.false_positives + self.false_negatives + self.true_positives
    }

    pub fn accuracy(&self) -> f64 {
        ratio(
            self.true_positives + self.true_negatives,
            self.total(),
        )
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    pub fn f1(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// Cost assumptions behind the churn-cost analysis: what each kind of
/// misclassification is priced at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChurnCost {
    /// Revenue lost when a churner goes undetected (per false negative).
    pub missed_churn_cost: f64,
    /// Retention incentive wasted on a stayer (per false positive).
    pub retention_offer_cost: f64,
}

impl ChurnCost {
    /// Estimated total misclassification cost over a confusion matrix.
    pub fn total(&self, cm: &ConfusionMatrix) -> f64 {
        cm.false_negatives as f64 * self.missed_churn_cost
            + cm.false_positives as f64 * self.retention_offer_cost
    }
}

/// Evaluation snapshot produced when the model artifact was trained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub evaluated_at: DateTime<Utc>,
    pub confusion_matrix: ConfusionMatrix,
    pub roc_auc: f64,
    pub pr_auc: f64,
    pub churn_cost: ChurnCost,
    pub feature_importances: Vec<FeatureImportance>,
}

pub fn load<S: Storage>(storage: &S, metrics_path: &str) -> Result<ModelMetrics> {
    let raw = storage.read_file(metrics_path)?;
    let metrics: ModelMetrics = serde_json::from_slice(&raw)?;
    Ok(metrics)
}

pub fn run<S: Storage>(storage: &S, metrics_path: &str) -> Result<String> {
    let metrics = load(storage, metrics_path)?;
    Ok(render_report(&metrics))
}

pub fn render_report(metrics: &ModelMetrics) -> String {
    let cm = &metrics.confusion_matrix;

    let mut out = String::new();
    out.push_str("Model Performance Evaluation\n");
    out.push_str(&format!(
        "Evaluated at: {}\n\n",
        metrics.evaluated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    out.push_str("Confusion Matrix\n");
    out.push_str(&format!(
        "  TN={}  FP={}\n  FN={}  TP={}\n\n",
        cm.true_negatives, cm.false_positives, cm.false_negatives, cm.true_positives
    ));

    out.push_str("Metrics\n");
    out.push_str(&format!("  Accuracy:  {:.3}\n", cm.accuracy()));
    out.push_str(&format!("  Precision: {:.3}\n", cm.precision()));
    out.push_str(&format!("  Recall:    {:.3}\n", cm.recall()));
    out.push_str(&format!("  F1:        {:.3}\n", cm.f1()));
    out.push_str(&format!("  ROC AUC:   {:.3}\n", metrics.roc_auc));
    out.push_str(&format!("  PR AUC:    {:.3}\n\n", metrics.pr_auc));

    let cost = &metrics.churn_cost;
    out.push_str("Churn Cost\n");
    out.push_str(&format!(
        "  Missed churner:  {:.2} per false negative\n",
        cost.missed_churn_cost
    ));
    out.push_str(&format!(
        "  Retention offer: {:.2} per false positive\n",
        cost.retention_offer_cost
    ));
    out.push_str(&format!("  Estimated total: {:.2}\n\n", cost.total(cm)));

    out.push_str("Feature Importances\n");
    for fi in &metrics.feature_importances {
        out.push_str(&format!("  {:<18} {:.4}\n", fi.feature, fi.importance));
    }

    out
}
