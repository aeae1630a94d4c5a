use std::path::PathBuf;

use karmalib::samples::SAMPLE_WALLET_ADDRESS;
use karmalib::views::{DeedCard, ProfileTab, ProfileView};
use karmalib::{profile_store, Avatar, Config, ImageSource, ProfileEdit, Theme};

use crate::util::{load_profile, print_heading, profile_deeds};
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "profile", about = "Show the profile page")]
pub struct ShowProfile {
    #[clap(long, default_value = "all", help = "all, validated or pending")]
    tab: String,
    #[clap(long, help = "Wallet address shown on the profile")]
    address: Option<String>,
}

impl ShowProfile {
    pub fn run(&self, config: &Config) -> Result<(), AppError> {
        let tab: ProfileTab = self
            .tab
            .parse()
            .map_err(|_| AppError::InvalidOption(self.tab.clone()))?;
        render(config, tab, self.address.as_deref())
    }
}

/// The profile page as reached through `/profile`.
pub fn show_default(config: &Config) -> Result<(), AppError> {
    render(config, ProfileTab::All, None)
}

fn render(
    config: &Config,
    tab: ProfileTab,
    address: Option<&str>,
) -> Result<(), AppError> {
    let address = address.unwrap_or(SAMPLE_WALLET_ADDRESS).to_owned();

    let view = ProfileView::new(
        load_profile(config)?,
        Some(address),
        profile_deeds(config)?,
    );

    print_heading(&view.profile.display_name);
    if let Some(address) = view.shortened_address() {
        println!("{}", address);
    }
    println!("Theme: {}", view.profile.theme);
    if !view.profile.bio.is_empty() {
        println!("About: {}", view.profile.bio);
    }
    println!();
    println!("{}", view.card);
    println!();
    for deed in view.tab(tab) {
        println!("{}", DeedCard(deed));
    }
    Ok(())
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "profile-set", about = "Edit and save the profile")]
pub struct SetProfile {
    #[clap(long)]
    name: Option<String>,
    #[clap(long)]
    bio: Option<String>,
    #[clap(long, help = "light, dark or purple")]
    theme: Option<String>,
    #[clap(long, help = "Name of a preset avatar")]
    avatar: Option<String>,
    #[clap(long, value_parser, help = "Image file to use as avatar")]
    avatar_file: Option<PathBuf>,
}

impl SetProfile {
    pub fn run(&self, config: &Config) -> Result<(), AppError> {
        let theme = self
            .theme
            .as_deref()
            .map(|theme| {
                theme
                    .parse::<Theme>()
                    .map_err(|_| AppError::InvalidOption(theme.to_owned()))
            })
            .transpose()?;

        let avatar = match (&self.avatar, &self.avatar_file) {
            (Some(_), Some(_)) => {
                return Err(AppError::InvalidOption(
                    "--avatar and --avatar-file are exclusive".to_owned(),
                ))
            }
            (Some(preset), None) => Some(Avatar::Preset(preset.clone())),
            (None, Some(path)) => {
                let source = ImageSource::File(path.clone());
                Some(Avatar::Uploaded(source.to_image()?))
            }
            (None, None) => None,
        };

        let mut store = profile_store(config)?;
        let mut profile = store.load_or_default();
        profile.apply(ProfileEdit {
            display_name: self.name.clone(),
            avatar,
            theme,
            bio: self.bio.clone(),
        });
        store.save(&profile)?;

        println!("Profile saved for {}", profile.display_name);
        Ok(())
    }
}
