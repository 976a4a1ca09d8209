use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Genre {
    #[sea_orm(string_value = "Action")]
    Action,
    #[sea_orm(string_value = "Comedy")]
    Comedy,
    #[sea_orm(string_value = "Drama")]
    Drama,
    #[sea_orm(string_value = "Horror")]
    Horror,
    #[sea_orm(string_value = "Sci-Fi")]
    #[serde(rename = "Sci-Fi")]
    SciFi,
    #[sea_orm(string_value = "Romance")]
    Romance,
    #[sea_orm(string_value = "Thriller")]
    Thriller,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum AwardName {
    #[sea_orm(string_value = "Oscar")]
    Oscar,
    #[sea_orm(string_value = "Golden Globe")]
    #[serde(rename = "Golden Globe")]
    GoldenGlobe,
    #[sea_orm(string_value = "BAFTA")]
    #[serde(rename = "BAFTA")]
    Bafta,
    #[sea_orm(string_value = "Cannes")]
    Cannes,
    #[sea_orm(string_value = "Critics Choice")]
    #[serde(rename = "Critics Choice")]
    CriticsChoice,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ActiveEnum, Iterable};

    #[test]
    fn string_values_match_the_stored_labels() {
        assert_eq!(Genre::SciFi.to_value(), "Sci-Fi");
        assert_eq!(AwardName::GoldenGlobe.to_value(), "Golden Globe");
        assert_eq!(Genre::iter().count(), 7);
        assert_eq!(AwardName::iter().count(), 5);
        assert_eq!(
            Genre::try_from_value(&"Thriller".to_owned()).ok(),
            Some(Genre::Thriller)
        );
    }
}
