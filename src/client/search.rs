use crate::models::candidate::Candidate;

/// Filtre insensible à la casse sur nom, parti et slogan
/// Une requête vide renvoie toute la liste
pub fn filter_candidates<'a>(candidates: &'a [Candidate], query: &str) -> Vec<&'a Candidate> {
    let query = query.to_lowercase();
    if query.is_empty() {
        return candidates.iter().collect();
    }

    candidates
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&query)
                || c.party.to_lowercase().contains(&query)
                || c.tagline.to_lowercase().contains(&query)
        })
        .collect()
}
