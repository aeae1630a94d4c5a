use std::fs;
use std::path::{Path, PathBuf};

use fs_storage::base_storage::BaseStorage;

use crate::config::Config;
use crate::deed::{DeedRecord, DeedStatus, ImageRef};
use crate::id::DeedId;
use crate::store::DeedRecordStore;
use crate::{KarmaError, Result};

pub const JUST_NOW: &str = "Just now";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A local file, inlined into the record on submission.
    File(PathBuf),
    Url(String),
}

impl ImageSource {
    /// Interpret user input: anything that looks like a URL stays a URL,
    /// everything else is a path.
    pub fn parse(input: &str) -> Self {
        if input.starts_with("http://")
            || input.starts_with("https://")
            || input.starts_with("data:")
        {
            ImageSource::Url(input.to_owned())
        } else {
            ImageSource::File(PathBuf::from(input))
        }
    }

    /// Load the image, inlining local files.
    pub fn to_image(&self) -> Result<ImageRef> {
        match self {
            ImageSource::Url(url) => url.parse(),
            ImageSource::File(path) => {
                let bytes = fs::read(path)?;
                log::debug!(
                    "inlining {} ({} bytes)",
                    path.display(),
                    bytes.len()
                );
                Ok(ImageRef::inline(mime_for(path), &bytes))
            }
        }
    }
}

fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        _ => "application/octet-stream",
    }
}

/// What the user typed into the submission form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeedDraft {
    pub title: String,
    pub description: String,
    pub image: Option<ImageSource>,
    pub location: String,
}

impl DeedDraft {
    /// Presence-only check, the same one that enables the submit button.
    pub fn is_submittable(&self, require_image: bool) -> bool {
        !self.title.trim().is_empty()
            && !self.description.trim().is_empty()
            && (!require_image || self.image.is_some())
    }
}

/// Turn a draft into a pending record.
///
/// Karma points are drawn from the configured range at this point,
/// before any validation has happened.
pub fn build_record(
    draft: &DeedDraft,
    rng: &mut fastrand::Rng,
    config: &Config,
) -> Result<DeedRecord> {
    let image = match &draft.image {
        Some(source) => source.to_image()?,
        None => config.placeholder_image.parse()?,
    };
    let location = draft.location.trim();

    Ok(DeedRecord {
        id: DeedId::generate(rng)?,
        title: draft.title.trim().to_owned(),
        description: draft.description.trim().to_owned(),
        image,
        karma_points: Some(rng.u32(config.karma_points())),
        created_at: JUST_NOW.to_owned(),
        location: (!location.is_empty()).then(|| location.to_owned()),
        status: DeedStatus::Pending,
        votes: 0,
        owner: None,
    })
}

/// Submits drafts into a [`DeedRecordStore`] after the simulated
/// network delay.
pub struct Submitter<S> {
    store: DeedRecordStore<S>,
    config: Config,
    rng: fastrand::Rng,
    owner: Option<String>,
}

impl<S> Submitter<S>
where
    S: BaseStorage<String, String>,
{
    pub fn new(store: DeedRecordStore<S>, config: Config) -> Self {
        Self::with_rng(store, config, fastrand::Rng::new())
    }

    pub fn with_rng(
        store: DeedRecordStore<S>,
        config: Config,
        rng: fastrand::Rng,
    ) -> Self {
        Self {
            store,
            config,
            rng,
            owner: None,
        }
    }

    /// Attribute submitted records to a wallet address.
    pub fn owned_by(mut self, owner: Option<String>) -> Self {
        self.owner = owner;
        self
    }

    /// Store a new pending record built from `draft`.
    ///
    /// An incomplete draft is refused before anything happens. Any
    /// failure afterwards, while encoding the image or writing the
    /// store, is reported as the same generic submission failure.
    pub async fn submit(&mut self, draft: &DeedDraft) -> Result<DeedRecord> {
        if !draft.is_submittable(self.config.require_image) {
            log::debug!("refusing incomplete draft");
            return Err(KarmaError::IncompleteDraft);
        }

        tokio::time::sleep(self.config.submit_delay()).await;

        self.store_draft(draft).map_err(|err| {
            log::error!("submitting deed failed: {}", err);
            KarmaError::SubmissionFailed(err.to_string())
        })
    }

    fn store_draft(&mut self, draft: &DeedDraft) -> Result<DeedRecord> {
        let mut record = build_record(draft, &mut self.rng, &self.config)?;
        record.owner = self.owner.clone();
        self.store.prepend(record.clone())?;
        Ok(record)
    }

    pub fn store(&mut self) -> &mut DeedRecordStore<S> {
        &mut self.store
    }
}
