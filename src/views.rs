use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::deed::{DeedRecord, DeedStatus};
use crate::id::DeedId;
use crate::profile::Profile;
use crate::samples::shorten_address;
use crate::score::ScoreCard;
use crate::vote::ValidationProgress;
use crate::KarmaError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfileTab {
    #[default]
    All,
    Validated,
    Pending,
}

impl FromStr for ProfileTab {
    type Err = KarmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(ProfileTab::All),
            "validated" => Ok(ProfileTab::Validated),
            "pending" => Ok(ProfileTab::Pending),
            _ => Err(KarmaError::Parse),
        }
    }
}

/// Everything the profile page shows.
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub profile: Profile,
    pub address: Option<String>,
    pub deeds: Vec<DeedRecord>,
    pub card: ScoreCard,
}

impl ProfileView {
    pub fn new(
        profile: Profile,
        address: Option<String>,
        deeds: Vec<DeedRecord>,
    ) -> Self {
        let card = ScoreCard::new(&profile.display_name, &deeds);
        Self {
            profile,
            address,
            deeds,
            card,
        }
    }

    pub fn tab(&self, tab: ProfileTab) -> Vec<&DeedRecord> {
        self.deeds
            .iter()
            .filter(|deed| match tab {
                ProfileTab::All => true,
                ProfileTab::Validated => deed.status == DeedStatus::Validated,
                ProfileTab::Pending => deed.status == DeedStatus::Pending,
            })
            .collect()
    }

    pub fn shortened_address(&self) -> Option<String> {
        self.address.as_deref().map(shorten_address)
    }
}

/// Outcome of opening `/nft/<id>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    Found(DeedRecord),
    NotFound,
}

/// Look `id` up among locally stored deeds, then in `catalog`.
pub fn resolve_detail(
    id: &DeedId,
    stored: &[DeedRecord],
    catalog: &BTreeMap<DeedId, DeedRecord>,
) -> DetailView {
    stored
        .iter()
        .find(|deed| &deed.id == id)
        .or_else(|| catalog.get(id))
        .cloned()
        .map(DetailView::Found)
        .unwrap_or(DetailView::NotFound)
}

/// One-card text rendering used by the CLI listings.
pub struct DeedCard<'a>(pub &'a DeedRecord);

impl fmt::Display for DeedCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let deed = self.0;
        write!(f, "[{}] {} ({})", deed.id, deed.title, deed.status)?;
        if let Some(points) = deed.karma_points {
            write!(f, " {} pts", points)?;
        }
        write!(f, ", {} votes, {}", deed.votes, deed.created_at)?;
        if let Some(location) = &deed.location {
            write!(f, ", {}", location)?;
        }
        Ok(())
    }
}

/// Validation-queue card: the deed plus its yes/no split.
pub struct ValidationCard<'a> {
    pub deed: &'a DeedRecord,
    pub voted: bool,
}

impl fmt::Display for ValidationCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = ValidationProgress::of(self.deed);
        write!(
            f,
            "{} | {} Yes / {} No ({:.0}%)",
            DeedCard(self.deed),
            progress.yes,
            progress.no,
            progress.yes_percentage
        )?;
        if let Some(owner) = &self.deed.owner {
            write!(f, " by {}", owner)?;
        }
        if self.voted {
            write!(f, " [voted]")?;
        }
        Ok(())
    }
}
