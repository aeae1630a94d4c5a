//! Built-in records shown when nothing has been stored locally.

use std::collections::BTreeMap;

use crate::deed::{DeedRecord, DeedStatus, ImageRef};
use crate::id::DeedId;

pub const SAMPLE_WALLET_ADDRESS: &str =
    "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

const BEACH_IMAGE: &str = "https://images.unsplash.com/photo-1618477461853-cf6ed80fafb7?auto=format&fit=crop&q=80";
const FOOD_BANK_IMAGE: &str = "https://images.unsplash.com/photo-1593113598332-cd288d649433?auto=format&fit=crop&q=80";
const TREES_IMAGE: &str = "https://images.unsplash.com/photo-1542601906990-b4d3fb778b09?auto=format&fit=crop&q=80";
const SENIOR_IMAGE: &str = "https://images.unsplash.com/photo-1581091226825-a6a2a5aee158?auto=format&fit=crop&q=80";
const BLOOD_IMAGE: &str = "https://images.unsplash.com/photo-1615461066841-6116e61058f4?auto=format&fit=crop&q=80";
const PARK_IMAGE: &str = "https://images.unsplash.com/photo-1567817886294-270bbb4b8243?auto=format&fit=crop&q=80";
const SHELTER_IMAGE: &str = "https://images.unsplash.com/photo-1593113630400-ea4288922497?auto=format&fit=crop&q=80";

struct Sample {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    image: &'static str,
    points: u32,
    created_at: &'static str,
    location: &'static str,
    status: DeedStatus,
    votes: u32,
    owner: Option<&'static str>,
}

impl Sample {
    fn build(&self) -> DeedRecord {
        DeedRecord {
            id: DeedId::from(self.id),
            title: self.title.to_owned(),
            description: self.description.to_owned(),
            image: ImageRef::Remote(self.image.to_owned()),
            karma_points: Some(self.points),
            created_at: self.created_at.to_owned(),
            location: Some(self.location.to_owned()),
            status: self.status,
            votes: self.votes,
            owner: self.owner.map(str::to_owned),
        }
    }
}

lazy_static! {
    static ref PROFILE_DEEDS: Vec<DeedRecord> = [
        Sample {
            id: "1",
            title: "Community Beach Cleanup",
            description: "Organized a team of volunteers to remove 50+ pounds of trash from local beaches.",
            image: BEACH_IMAGE,
            points: 25,
            created_at: "2 days ago",
            location: "San Francisco, CA",
            status: DeedStatus::Validated,
            votes: 42,
            owner: None,
        },
        Sample {
            id: "2",
            title: "Food Bank Volunteer",
            description: "Spent 8 hours packaging meals for families in need at the local food bank.",
            image: FOOD_BANK_IMAGE,
            points: 20,
            created_at: "1 week ago",
            location: "Austin, TX",
            status: DeedStatus::Validated,
            votes: 38,
            owner: None,
        },
        Sample {
            id: "3",
            title: "Tree Planting Initiative",
            description: "Planted 15 trees in a community park as part of a local environmental restoration project.",
            image: TREES_IMAGE,
            points: 30,
            created_at: "2 weeks ago",
            location: "Portland, OR",
            status: DeedStatus::Validated,
            votes: 56,
            owner: None,
        },
        Sample {
            id: "4",
            title: "Senior Center Visit",
            description: "Spent an afternoon visiting with seniors at a local retirement home.",
            image: SENIOR_IMAGE,
            points: 15,
            created_at: "3 weeks ago",
            location: "Chicago, IL",
            status: DeedStatus::Pending,
            votes: 12,
            owner: None,
        },
    ]
    .iter()
    .map(Sample::build)
    .collect();

    static ref PENDING_DEEDS: Vec<DeedRecord> = [
        Sample {
            id: "4",
            title: "Senior Center Visit",
            description: "Spent an afternoon visiting with seniors at a local retirement home, playing games and listening to their stories.",
            image: SENIOR_IMAGE,
            points: 15,
            created_at: "3 days ago",
            location: "Chicago, IL",
            status: DeedStatus::Pending,
            votes: 12,
            owner: Some("0x8273...4589"),
        },
        Sample {
            id: "5",
            title: "Blood Donation",
            description: "Donated blood at the local Red Cross blood drive to help save lives in my community.",
            image: BLOOD_IMAGE,
            points: 25,
            created_at: "1 day ago",
            location: "Boston, MA",
            status: DeedStatus::Pending,
            votes: 18,
            owner: Some("0x9384...1239"),
        },
        Sample {
            id: "6",
            title: "Park Cleanup",
            description: "Spent Saturday morning picking up litter at Jefferson Park to make it cleaner for weekend visitors.",
            image: PARK_IMAGE,
            points: 20,
            created_at: "2 days ago",
            location: "Denver, CO",
            status: DeedStatus::Pending,
            votes: 8,
            owner: Some("0x2345...8912"),
        },
        Sample {
            id: "7",
            title: "Homeless Shelter Volunteer",
            description: "Volunteered at a local homeless shelter, preparing and serving meals to those in need.",
            image: SHELTER_IMAGE,
            points: 30,
            created_at: "4 days ago",
            location: "Seattle, WA",
            status: DeedStatus::Pending,
            votes: 22,
            owner: Some("0x7654...2345"),
        },
    ]
    .iter()
    .map(Sample::build)
    .collect();

    static ref DETAIL_CATALOG: BTreeMap<DeedId, DeedRecord> = [
        Sample {
            id: "1",
            title: "Community Beach Cleanup",
            description: "Organized a team of volunteers to remove 50+ pounds of trash from local beaches. We collected plastic, glass, and other waste that could harm marine life. The event brought together 15 people from the community and raised awareness about ocean pollution.",
            image: BEACH_IMAGE,
            points: 25,
            created_at: "April 12, 2025",
            location: "San Francisco, CA",
            status: DeedStatus::Validated,
            votes: 42,
            owner: Some("0x1234...5678"),
        },
        Sample {
            id: "2",
            title: "Food Bank Volunteer",
            description: "Spent 8 hours packaging meals for families in need at the local food bank. We packaged over 200 meal kits that would feed approximately 50 families for a week.",
            image: FOOD_BANK_IMAGE,
            points: 20,
            created_at: "April 5, 2025",
            location: "Austin, TX",
            status: DeedStatus::Validated,
            votes: 38,
            owner: Some("0x8765...4321"),
        },
        Sample {
            id: "3",
            title: "Tree Planting Initiative",
            description: "Planted 15 trees in a community park as part of a local environmental restoration project. The trees were native species chosen to support local wildlife and improve air quality in the urban environment.",
            image: TREES_IMAGE,
            points: 30,
            created_at: "March 27, 2025",
            location: "Portland, OR",
            status: DeedStatus::Validated,
            votes: 56,
            owner: Some("0x2468...1357"),
        },
    ]
    .iter()
    .map(|sample| (DeedId::from(sample.id), sample.build()))
    .collect();
}

/// Deeds shown on the profile page: three validated, one pending.
pub fn profile_deeds() -> Vec<DeedRecord> {
    PROFILE_DEEDS.clone()
}

/// Submissions waiting in the validation queue.
pub fn pending_deeds() -> Vec<DeedRecord> {
    PENDING_DEEDS.clone()
}

/// Validated deeds highlighted on the home page.
pub fn featured_deeds() -> Vec<DeedRecord> {
    PROFILE_DEEDS
        .iter()
        .filter(|deed| deed.is_validated())
        .map(|deed| {
            let mut deed = deed.clone();
            deed.owner = DETAIL_CATALOG
                .get(&deed.id)
                .and_then(|detailed| detailed.owner.clone());
            deed
        })
        .collect()
}

pub fn detail_catalog() -> &'static BTreeMap<DeedId, DeedRecord> {
    &DETAIL_CATALOG
}

/// Shorten a wallet address to `0x1234...abcd`.
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_owned();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::karma_score;

    #[test]
    fn sample_profile_score() {
        assert_eq!(karma_score(&profile_deeds()), 75);
    }

    #[test]
    fn pending_queue_is_all_pending() {
        let queue = pending_deeds();
        assert_eq!(queue.len(), 4);
        assert!(queue.iter().all(|d| d.status == DeedStatus::Pending));
        assert!(queue.iter().all(|d| d.owner.is_some()));
    }

    #[test]
    fn featured_deeds_carry_owners() {
        let featured = featured_deeds();
        assert_eq!(featured.len(), 3);
        assert_eq!(featured[0].owner.as_deref(), Some("0x1234...5678"));
    }

    #[test]
    fn shortened_sample_address() {
        assert_eq!(shorten_address(SAMPLE_WALLET_ADDRESS), "0xd8dA...6045");
        assert_eq!(shorten_address("0x12"), "0x12");
    }

    #[test]
    fn every_sample_image_is_a_valid_location() {
        let all = profile_deeds()
            .into_iter()
            .chain(pending_deeds())
            .chain(featured_deeds())
            .chain(detail_catalog().values().cloned());
        for deed in all {
            let location = deed.image.to_string();
            assert_eq!(ImageRef::remote(&location).unwrap(), deed.image);

            let json = serde_json::to_string(&deed).unwrap();
            let reloaded: DeedRecord = serde_json::from_str(&json).unwrap();
            assert_eq!(reloaded, deed);
        }
    }
}
