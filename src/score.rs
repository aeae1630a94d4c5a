use std::fmt;

use crate::deed::DeedRecord;

/// Lower bound of each tier, ascending.
pub const TIER_THRESHOLDS: [u32; 5] = [0, 30, 70, 150, 300];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KarmaTier {
    Beginner,
    Rising,
    Established,
    Advanced,
    Enlightened,
}

impl KarmaTier {
    const ALL: [KarmaTier; 5] = [
        KarmaTier::Beginner,
        KarmaTier::Rising,
        KarmaTier::Established,
        KarmaTier::Advanced,
        KarmaTier::Enlightened,
    ];

    pub fn from_score(score: u32) -> Self {
        TIER_THRESHOLDS
            .iter()
            .zip(Self::ALL)
            .rev()
            .find(|(threshold, _)| score >= **threshold)
            .map(|(_, tier)| tier)
            .unwrap_or(KarmaTier::Beginner)
    }

    pub fn label(&self) -> &'static str {
        match self {
            KarmaTier::Beginner => "Beginner",
            KarmaTier::Rising => "Rising",
            KarmaTier::Established => "Established",
            KarmaTier::Advanced => "Advanced",
            KarmaTier::Enlightened => "Enlightened",
        }
    }
}

impl fmt::Display for KarmaTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sum of karma points over validated records.
pub fn karma_score<'a, I>(records: I) -> u32
where
    I: IntoIterator<Item = &'a DeedRecord>,
{
    records
        .into_iter()
        .map(DeedRecord::earned_points)
        .fold(0u32, u32::saturating_add)
}

/// Number of validated records, shown as "Soulbound NFTs".
pub fn validated_count<'a, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'a DeedRecord>,
{
    records
        .into_iter()
        .filter(|record| record.is_validated())
        .count()
}

/// Score-card progress bar value, `min(score / 10, 100)` percent.
pub fn progress_level(score: u32) -> f64 {
    (f64::from(score) / 10.0).min(100.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    pub username: String,
    pub score: u32,
    pub tier: KarmaTier,
    pub progress: f64,
    pub nft_count: usize,
}

impl ScoreCard {
    pub fn new(username: &str, records: &[DeedRecord]) -> Self {
        let score = karma_score(records);
        Self {
            username: username.to_owned(),
            score,
            tier: KarmaTier::from_score(score),
            progress: progress_level(score),
            nft_count: validated_count(records),
        }
    }
}

impl fmt::Display for ScoreCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}'s Karma", self.username)?;
        writeln!(f, "  {} Karma Points ({})", self.score, self.tier)?;
        writeln!(f, "  Progress to Next Level: {:.0}%", self.progress)?;
        write!(f, "  Soulbound NFTs: {}", self.nft_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deed::{DeedStatus, ImageRef};
    use crate::id::DeedId;
    use quickcheck_macros::quickcheck;
    use rstest::rstest;

    fn record(points: Option<u32>, status: DeedStatus) -> DeedRecord {
        DeedRecord {
            id: DeedId::from("x"),
            title: "t".to_owned(),
            description: "d".to_owned(),
            image: ImageRef::remote("https://example.com/i.png").unwrap(),
            karma_points: points,
            created_at: "now".to_owned(),
            location: None,
            status,
            votes: 0,
            owner: None,
        }
    }

    fn status_of(n: u8) -> DeedStatus {
        match n % 3 {
            0 => DeedStatus::Pending,
            1 => DeedStatus::Validated,
            _ => DeedStatus::Rejected,
        }
    }

    #[rstest]
    #[case(0, KarmaTier::Beginner)]
    #[case(29, KarmaTier::Beginner)]
    #[case(30, KarmaTier::Rising)]
    #[case(69, KarmaTier::Rising)]
    #[case(70, KarmaTier::Established)]
    #[case(149, KarmaTier::Established)]
    #[case(150, KarmaTier::Advanced)]
    #[case(299, KarmaTier::Advanced)]
    #[case(300, KarmaTier::Enlightened)]
    #[case(u32::MAX, KarmaTier::Enlightened)]
    fn tier_boundaries(#[case] score: u32, #[case] expected: KarmaTier) {
        assert_eq!(KarmaTier::from_score(score), expected);
    }

    #[test]
    fn only_validated_records_count() {
        let records = vec![
            record(Some(25), DeedStatus::Validated),
            record(Some(100), DeedStatus::Pending),
            record(Some(40), DeedStatus::Rejected),
            record(None, DeedStatus::Validated),
            record(Some(5), DeedStatus::Validated),
        ];
        assert_eq!(karma_score(&records), 30);
        assert_eq!(validated_count(&records), 3);
    }

    #[test]
    fn progress_is_capped() {
        assert_eq!(progress_level(75), 7.5);
        assert_eq!(progress_level(5000), 100.0);
    }

    #[test]
    fn score_card_for_samples() {
        let card = ScoreCard::new("KarmaUser", &crate::samples::profile_deeds());
        assert_eq!(card.score, 75);
        assert_eq!(card.tier, KarmaTier::Established);
        assert_eq!(card.nft_count, 3);
        assert!(card.to_string().contains("75 Karma Points (Established)"));
    }

    #[quickcheck]
    fn prop_score_is_sum_of_validated(entries: Vec<(u16, u8)>) -> bool {
        let records: Vec<DeedRecord> = entries
            .iter()
            .map(|(points, status)| {
                record(Some(u32::from(*points)), status_of(*status))
            })
            .collect();
        let expected: u32 = entries
            .iter()
            .filter(|(_, status)| status_of(*status) == DeedStatus::Validated)
            .map(|(points, _)| u32::from(*points))
            .sum();
        karma_score(&records) == expected
    }

    #[quickcheck]
    fn prop_tier_is_monotonic(a: u32, b: u32) -> bool {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        KarmaTier::from_score(low) <= KarmaTier::from_score(high)
    }
}
