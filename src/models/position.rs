use serde::Deserialize;

/// One placement from the external positioning service.
///
/// `place` may be a literal room number ("66109") or a zone label ("2:X").
/// `latitude`/`longitude` live in the service's normalized [0,10] space,
/// origin bottom-left. `name` is unverified free text; an empty name means
/// the placement is unoccupied and only contributes to the place lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPosition {
    #[serde(default)]
    pub name: String,

    pub place: String,

    pub latitude: f64,
    pub longitude: f64,
}

impl RawPosition {
    pub fn is_occupied(&self) -> bool {
        !self.name.trim().is_empty()
    }
}
