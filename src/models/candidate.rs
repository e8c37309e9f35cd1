use serde::{Deserialize, Serialize};

/// Candidat présenté sur le bulletin. Données de référence statiques,
/// fournies par la configuration au démarrage (jamais persistées).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub party: String,
    pub tagline: String,
}

const SAMPLE_PARTIES: [&str; 4] = ["Independent", "Green", "Labour", "Democratic"];

/// Liste d'exemple utilisée quand CANDIDATES_FILE n'est pas défini
/// (c1..cN, partis en rotation)
pub fn sample_candidates(count: usize) -> Vec<Candidate> {
    (1..=count)
        .map(|n| Candidate {
            id: format!("c{}", n),
            name: format!("Candidate {}", n),
            party: SAMPLE_PARTIES[(n - 1) % SAMPLE_PARTIES.len()].to_string(),
            tagline: format!("Platform highlight #{}", n),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_candidates_rotate_parties() {
        let candidates = sample_candidates(50);

        assert_eq!(candidates.len(), 50);
        assert_eq!(candidates[0].id, "c1");
        assert_eq!(candidates[0].party, "Independent");
        assert_eq!(candidates[5].party, "Green");
        assert_eq!(candidates[49].id, "c50");
        assert_eq!(candidates[49].tagline, "Platform highlight #50");
    }
}
