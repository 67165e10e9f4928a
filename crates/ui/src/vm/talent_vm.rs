use talents_core::model::Talent;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TalentCardVm {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub color: String,
}

impl From<&Talent> for TalentCardVm {
    fn from(talent: &Talent) -> Self {
        Self {
            id: talent.id.value(),
            title: talent.title.clone(),
            description: talent.description.clone(),
            color: talent.display_color().to_string(),
        }
    }
}

#[must_use]
pub fn map_talent_cards(talents: &[Talent]) -> Vec<TalentCardVm> {
    talents.iter().map(TalentCardVm::from).collect()
}

/// "1 talent" or "3 talenten".
#[must_use]
pub fn talent_count_label(count: usize) -> String {
    if count == 1 {
        "1 talent".to_string()
    } else {
        format!("{count} talenten")
    }
}
