use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::model::ids::{QuestionId, TalentId};
use crate::model::question::Question;
use crate::model::talent::Talent;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("duplicate question id {0}")]
    DuplicateQuestion(QuestionId),

    #[error("duplicate talent id {0}")]
    DuplicateTalent(TalentId),

    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// The static dataset the quiz runs over: an ordered question list and the
/// talents those questions point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    questions: Vec<Question>,
    talents: Vec<Talent>,
}

#[derive(Deserialize)]
struct CatalogFile {
    questions: Vec<Question>,
    talents: Vec<Talent>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate identifiers.
    ///
    /// Questions that reference an unknown talent are accepted; a right swipe
    /// on them simply selects nothing.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateQuestion` or `CatalogError::DuplicateTalent`.
    pub fn new(questions: Vec<Question>, talents: Vec<Talent>) -> Result<Self, CatalogError> {
        let mut seen_questions = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen_questions.insert(question.id) {
                return Err(CatalogError::DuplicateQuestion(question.id));
            }
        }
        let mut seen_talents = HashSet::with_capacity(talents.len());
        for talent in &talents {
            if !seen_talents.insert(talent.id) {
                return Err(CatalogError::DuplicateTalent(talent.id));
            }
        }

        Ok(Self { questions, talents })
    }

    /// Parses a `{"questions": [...], "talents": [...]}` document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON, or a duplicate-id error.
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(raw)?;
        Self::new(file.questions, file.talents)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, otherwise as `from_json_str`.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn talents(&self) -> &[Talent] {
        &self.talents
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn talent_count(&self) -> usize {
        self.talents.len()
    }

    #[must_use]
    pub fn talent(&self, id: TalentId) -> Option<&Talent> {
        self.talents.iter().find(|talent| talent.id == id)
    }

    /// Questions whose talent id has no matching talent.
    pub fn dangling_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions
            .iter()
            .filter(|question| self.talent(question.talent_id).is_none())
    }

    /// The KSA talent dataset shipped with the app.
    #[must_use]
    pub fn builtin() -> Self {
        let talents = BUILTIN_TALENTS
            .iter()
            .map(|(id, title, description, color)| {
                Talent::new(TalentId::new(*id), *title, *description).with_color(*color)
            })
            .collect();
        let questions = BUILTIN_QUESTIONS
            .iter()
            .map(|(id, text, talent_id, color)| {
                Question::new(QuestionId::new(*id), *text, TalentId::new(*talent_id))
                    .with_color(*color)
            })
            .collect();
        Self { questions, talents }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

const BUILTIN_TALENTS: &[(u64, &str, &str, &str)] = &[
    (
        1,
        "Leiderschap",
        "Leid je groep met vertrouwen! Als natuurlijke leider inspireer je anderen, neem je verantwoordelijkheid en help je iedereen om hun beste zelf te zijn tijdens activiteiten en kampen.",
        "#4a7ae8",
    ),
    (
        2,
        "Creativiteit",
        "Breng kleur in elke activiteit! Met jouw creativiteit verzin je originele spelletjes, knutselprojecten en thematische activiteiten die iedereen lang zullen bijblijven.",
        "#6b73ff",
    ),
    (
        3,
        "Teamwork",
        "Samen staan we sterk! Jij weet hoe je goed kunt samenwerken, anderen kunt motiveren en zorgt dat iedereen zich welkom voelt in de groep.",
        "#4f9cf9",
    ),
    (
        4,
        "Communicatie",
        "Jouw stem wordt gehoord! Je communiceert helder, luistert goed naar anderen en weet hoe je boodschappen op een begrijpelijke manier overbrengt.",
        "#5a6acf",
    ),
    (
        5,
        "Organisatie",
        "Alles op rolletjes! Met jouw organisatietalent zorg je ervoor dat activiteiten vlot verlopen, materiaal klaarstaat en iedereen weet wat er van hen verwacht wordt.",
        "#3366cc",
    ),
    (
        6,
        "Empathie",
        "Jij voelt anderen aan! Je hebt een natuurlijk vermogen om te begrijpen hoe anderen zich voelen en biedt steun wanneer het nodig is.",
        "#7c3aed",
    ),
    (
        7,
        "Sportiviteit",
        "Actief en energiek! Je houdt van bewegen, sport en buitenactiviteiten. Je motiveert anderen om mee te doen en zorgt voor een gezonde competitiegeest.",
        "#2952a3",
    ),
    (
        8,
        "Technische Vaardigheden",
        "Handig met tools en technieken! Van knopen leggen tot tentjes opzetten, jij weet hoe dingen werken en helpt anderen graag met praktische zaken.",
        "#4a90e2",
    ),
];

const BUILTIN_QUESTIONS: &[(u64, &str, u64, &str)] = &[
    (1, "Neem je graag de leiding tijdens groepsactiviteiten?", 1, "#4a7ae8"),
    (2, "Verzin je vaak nieuwe en originele ideeën voor spelletjes?", 2, "#6b73ff"),
    (3, "Werk je liever samen met anderen dan alleen?", 3, "#4f9cf9"),
    (4, "Luisteren anderen goed naar je wanneer je iets uitlegt?", 4, "#5a6acf"),
    (5, "Hou je ervan om activiteiten van tevoren goed te plannen?", 5, "#3366cc"),
    (6, "Merk je snel op wanneer iemand zich niet goed voelt?", 6, "#7c3aed"),
    (7, "Doe je graag mee aan sportieve activiteiten en buitenspelen?", 7, "#2952a3"),
    (8, "Ben je handig met het maken en repareren van dingen?", 8, "#4a90e2"),
];

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
