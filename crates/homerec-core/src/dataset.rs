//! In-memory dataset of elapsed-time instances and the actions that followed.
//!
//! Loading from disk is up to the caller; this type only guarantees that rows
//! are rectangular and that every label belongs to the action vocabulary.

use crate::belief::ActionSet;
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Dataset {
    name: String,
    features: Vec<String>,
    actions: ActionSet,
    data: Vec<Vec<f64>>,
    target: Vec<String>,
}

impl Dataset {
    pub fn new(
        name: impl Into<String>,
        features: Vec<String>,
        actions: ActionSet,
        data: Vec<Vec<f64>>,
        target: Vec<String>,
    ) -> Result<Self> {
        if data.len() != target.len() {
            return Err(Error::shape("labels", data.len(), target.len()));
        }
        if let Some(row) = data.iter().find(|row| row.len() != features.len()) {
            return Err(Error::shape("features", features.len(), row.len()));
        }
        for label in &target {
            actions.require(label)?;
        }
        Ok(Self {
            name: name.into(),
            features,
            actions,
            data,
            target,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn actions(&self) -> &ActionSet {
        &self.actions
    }

    pub fn target_names(&self) -> &[String] {
        self.actions.labels()
    }

    pub fn data(&self) -> &[Vec<f64>] {
        &self.data
    }

    pub fn target(&self) -> &[String] {
        &self.target
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Rows and labels at `indices`, in the order given.
    pub fn subset(&self, indices: &[usize]) -> Result<Self> {
        let mut data = Vec::with_capacity(indices.len());
        let mut target = Vec::with_capacity(indices.len());
        for &i in indices {
            let (row, label) = self
                .data
                .get(i)
                .zip(self.target.get(i))
                .ok_or_else(|| Error::shape("instance index", self.len(), i))?;
            data.push(row.clone());
            target.push(label.clone());
        }
        Ok(Self {
            name: self.name.clone(),
            features: self.features.clone(),
            actions: self.actions.clone(),
            data,
            target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new(
            "houseA",
            vec!["door".into(), "hall".into()],
            ActionSet::new(["open", "close"]).unwrap(),
            vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
            vec!["open".into(), "close".into(), "open".into()],
        )
        .unwrap()
    }

    #[test]
    fn validates_rows_and_labels() {
        let actions = ActionSet::new(["open"]).unwrap();
        let ragged = Dataset::new(
            "x",
            vec!["door".into()],
            actions.clone(),
            vec![vec![1.0, 2.0]],
            vec!["open".into()],
        );
        assert!(matches!(ragged, Err(Error::Shape { what: "features", .. })));

        let unknown = Dataset::new("x", vec!["door".into()], actions, vec![vec![1.0]], vec!["tv".into()]);
        assert_eq!(unknown.unwrap_err(), Error::UnknownAction("tv".into()));
    }

    #[test]
    fn subset_keeps_order() {
        let d = dataset();
        let s = d.subset(&[2, 0]).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.data()[0], vec![5.0, 6.0]);
        assert_eq!(s.target(), &["open".to_string(), "open".to_string()]);
        assert_eq!(s.target_names(), d.target_names());
    }

    #[test]
    fn subset_out_of_range() {
        assert!(dataset().subset(&[3]).is_err());
    }
}
