use std::collections::HashSet;
use std::time::Duration;

use fs_storage::base_storage::BaseStorage;

use crate::deed::{DeedRecord, DeedStatus};
use crate::id::DeedId;
use crate::store::DeedRecordStore;
use crate::{KarmaError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    Recorded(DeedRecord),
    /// This session already voted on the deed, nothing changed.
    AlreadyVoted,
}

/// Community voting over an in-memory list of deeds.
///
/// The set of voted ids lives only as long as the simulator, so "one
/// vote per deed" holds for a single session and nothing more.
pub struct VoteSimulator {
    deeds: Vec<DeedRecord>,
    voted: HashSet<DeedId>,
    delay: Duration,
}

impl VoteSimulator {
    pub fn new(deeds: Vec<DeedRecord>, delay: Duration) -> Self {
        Self {
            deeds,
            voted: HashSet::new(),
            delay,
        }
    }

    /// Record a vote after the simulated delay.
    ///
    /// If the returned future is dropped before the delay elapses the
    /// deed is left untouched.
    pub async fn vote(
        &mut self,
        id: &DeedId,
        is_valid: bool,
    ) -> Result<VoteOutcome> {
        if self.has_voted(id) {
            log::debug!("deed {} already voted in this session", id);
            return Ok(VoteOutcome::AlreadyVoted);
        }
        if !self.deeds.iter().any(|deed| &deed.id == id) {
            log::error!("vote on unknown deed {}", id);
            return Err(KarmaError::VoteFailed(format!("no deed {id}")));
        }

        tokio::time::sleep(self.delay).await;

        let deed = self
            .deeds
            .iter_mut()
            .find(|deed| &deed.id == id)
            .ok_or_else(|| KarmaError::VoteFailed(format!("no deed {id}")))?;

        let next = DeedStatus::from_vote(is_valid);
        if !deed.status.can_transition_to(next) {
            log::warn!(
                "deed {} moves from {} to {}",
                deed.id,
                deed.status,
                next
            );
        }
        deed.status = next;
        deed.votes = deed.votes.saturating_add(1);
        self.voted.insert(id.clone());

        log::info!(
            "deed {} voted {} ({} votes)",
            id,
            if is_valid { "valid" } else { "invalid" },
            deed.votes
        );
        Ok(VoteOutcome::Recorded(deed.clone()))
    }

    pub fn has_voted(&self, id: &DeedId) -> bool {
        self.voted.contains(id)
    }

    pub fn deeds(&self) -> &[DeedRecord] {
        &self.deeds
    }

    /// Deeds this session has not voted on yet.
    pub fn pending(&self) -> Vec<&DeedRecord> {
        self.deeds
            .iter()
            .filter(|deed| !self.has_voted(&deed.id))
            .collect()
    }

    /// Deeds this session voted on.
    pub fn voted(&self) -> Vec<&DeedRecord> {
        self.deeds
            .iter()
            .filter(|deed| self.has_voted(&deed.id))
            .collect()
    }

    pub fn into_deeds(self) -> Vec<DeedRecord> {
        self.deeds
    }
}

/// Write a recorded vote back to `store`.
///
/// Returns `false` for deeds that only exist in the session, such as
/// the samples. Any storage failure is reported as a failed vote.
pub fn persist_vote<S>(
    store: &mut DeedRecordStore<S>,
    deed: &DeedRecord,
) -> Result<bool>
where
    S: BaseStorage<String, String>,
{
    store.replace(deed).map_err(|err| {
        log::error!("recording vote on {} failed: {}", deed.id, err);
        KarmaError::VoteFailed(err.to_string())
    })
}

/// Yes/no split shown on a validation card.
///
/// Only yes votes are tracked, the no count is derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationProgress {
    pub yes: u32,
    pub no: u32,
    pub yes_percentage: f64,
}

impl ValidationProgress {
    pub fn of(deed: &DeedRecord) -> Self {
        let yes = deed.votes;
        let no = (f64::from(yes) * 0.3).floor() as u32;
        let total = f64::from(yes) + f64::from(no);
        let yes_percentage = if total > 0.0 {
            f64::from(yes) / total * 100.0
        } else {
            0.0
        };
        Self {
            yes,
            no,
            yes_percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::notice::{Notice, VOTE_ERROR};
    use crate::samples;
    use tempdir::TempDir;

    fn simulator() -> VoteSimulator {
        VoteSimulator::new(samples::pending_deeds(), Duration::from_secs(1))
    }

    #[tokio::test(start_paused = true)]
    async fn vote_updates_status_and_count() {
        let mut sim = simulator();
        let id = DeedId::from("5");

        let outcome = sim.vote(&id, true).await.unwrap();
        let VoteOutcome::Recorded(deed) = outcome else {
            panic!("vote was not recorded");
        };
        assert_eq!(deed.status, DeedStatus::Validated);
        assert_eq!(deed.votes, 19);
        assert!(sim.has_voted(&id));
        assert_eq!(sim.pending().len(), 3);
        assert_eq!(sim.voted().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn second_vote_is_a_no_op() {
        let mut sim = simulator();
        let id = DeedId::from("6");

        sim.vote(&id, false).await.unwrap();
        let outcome = sim.vote(&id, true).await.unwrap();
        assert_eq!(outcome, VoteOutcome::AlreadyVoted);

        let deed = sim.deeds().iter().find(|d| d.id == id).unwrap();
        assert_eq!(deed.status, DeedStatus::Rejected);
        assert_eq!(deed.votes, 9);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_deed_fails() {
        let mut sim = simulator();
        let result = sim.vote(&DeedId::from("nope"), true).await;
        assert!(matches!(result, Err(KarmaError::VoteFailed(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn a_new_session_can_vote_again() {
        let mut sim = simulator();
        let id = DeedId::from("4");
        sim.vote(&id, true).await.unwrap();

        let mut next_session =
            VoteSimulator::new(sim.into_deeds(), Duration::from_secs(1));
        let outcome = next_session.vote(&id, true).await.unwrap();
        let VoteOutcome::Recorded(deed) = outcome else {
            panic!("vote was not recorded");
        };
        assert_eq!(deed.votes, 14);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_vote_changes_nothing() {
        let mut sim = simulator();
        let id = DeedId::from("7");

        let timed_out = tokio::time::timeout(
            Duration::from_millis(10),
            sim.vote(&id, true),
        )
        .await;
        assert!(timed_out.is_err());

        assert!(!sim.has_voted(&id));
        let deed = sim.deeds().iter().find(|d| d.id == id).unwrap();
        assert_eq!(deed.status, DeedStatus::Pending);
        assert_eq!(deed.votes, 22);
    }

    #[test]
    fn validation_progress_split() {
        let deed = &samples::pending_deeds()[0];
        let progress = ValidationProgress::of(deed);
        assert_eq!(progress.yes, 12);
        assert_eq!(progress.no, 3);
        assert!((progress.yes_percentage - 80.0).abs() < 1e-9);
    }

    #[test]
    fn validation_progress_without_votes() {
        let mut deed = samples::pending_deeds()[0].clone();
        deed.votes = 0;
        assert_eq!(ValidationProgress::of(&deed).yes_percentage, 0.0);
    }

    #[test]
    fn validation_progress_with_huge_vote_count() {
        let mut deed = samples::pending_deeds()[0].clone();
        deed.votes = u32::MAX;
        let progress = ValidationProgress::of(&deed);
        assert_eq!(progress.yes, u32::MAX);
        assert!(progress.no > 0);
        assert!(progress.yes_percentage > 76.0);
        assert!(progress.yes_percentage < 77.0);
    }

    #[test]
    fn storage_failure_is_a_failed_vote() {
        let dir = TempDir::new("karma_vote").unwrap();
        // the data dir is a plain file, so the store can be neither
        // read nor written
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let config = Config {
            data_dir: blocker,
            ..Config::default()
        };

        let mut store = crate::deed_store(&config).unwrap();
        let deed = samples::pending_deeds()[0].clone();
        let err = persist_vote(&mut store, &deed).unwrap_err();
        assert!(matches!(err, KarmaError::VoteFailed(_)));
        assert_eq!(Notice::from(&err).description, VOTE_ERROR);
    }

    #[test]
    fn session_only_deeds_are_not_persisted() {
        let dir = TempDir::new("karma_vote").unwrap();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };

        let mut store = crate::deed_store(&config).unwrap();
        let deed = samples::pending_deeds()[0].clone();
        assert!(!persist_vote(&mut store, &deed).unwrap());
        assert!(!config.storage_path().exists());
    }
}
