use thiserror::Error;

/// Sélection ordonnée en cours de construction (rang 1 en tête)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BallotDraft {
    picks: Vec<String>,
    capacity: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Maximum {0} picks reached")]
    Full(usize),
    #[error("Pick exactly {expected} candidates")]
    Incomplete { expected: usize, actual: usize },
    #[error("No pick at rank {0}")]
    OutOfRange(usize),
}

impl BallotDraft {
    pub fn new(capacity: usize) -> Self {
        Self {
            picks: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Ajoute un candidat en dernière position
    /// Ok(false) s'il était déjà sélectionné (rien ne change)
    pub fn add(&mut self, id: &str) -> Result<bool, DraftError> {
        if self.contains(id) {
            return Ok(false);
        }
        if self.picks.len() >= self.capacity {
            return Err(DraftError::Full(self.capacity));
        }

        self.picks.push(id.to_string());
        Ok(true)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.picks.len();
        self.picks.retain(|pick| pick != id);
        self.picks.len() != before
    }

    /// Déplace l'entrée `from` vers l'index `to`, les entrées intermédiaires glissent
    pub fn move_pick(&mut self, from: usize, to: usize) -> Result<(), DraftError> {
        let len = self.picks.len();
        if from >= len {
            return Err(DraftError::OutOfRange(from + 1));
        }
        if to >= len {
            return Err(DraftError::OutOfRange(to + 1));
        }
        if from == to {
            return Ok(());
        }

        let pick = self.picks.remove(from);
        self.picks.insert(to, pick);
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.picks.iter().any(|pick| pick == id)
    }

    /// Rang affiché (1 = préférence la plus forte)
    pub fn rank_of(&self, id: &str) -> Option<usize> {
        self.picks.iter().position(|pick| pick == id).map(|index| index + 1)
    }

    pub fn picks(&self) -> &[String] {
        &self.picks
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_complete(&self) -> bool {
        self.picks.len() == self.capacity
    }

    /// Le bulletin à envoyer, seulement s'il est complet
    pub fn submission(&self) -> Result<Vec<String>, DraftError> {
        if !self.is_complete() {
            return Err(DraftError::Incomplete {
                expected: self.capacity,
                actual: self.picks.len(),
            });
        }
        Ok(self.picks.clone())
    }
}
