//! Step-by-step conversion request form.
//!
//! The wizard walks the field descriptors of the selected platform one at a
//! time, filtered by whether the user is creating a new playlist or updating
//! an existing one. The last step produces a single [`ConversionRequest`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::client::ConversionRequest;

/// Source platform of the playlist being converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Convert a Spotify playlist to YouTube.
    Spotify,
    /// Convert a YouTube playlist to Spotify.
    #[serde(rename = "youtube")]
    YouTube,
}

impl Platform {
    /// Both platforms, in menu order.
    pub const ALL: [Self; 2] = [Self::Spotify, Self::YouTube];

    /// Backend path of the conversion endpoint.
    #[must_use]
    pub const fn endpoint_path(self) -> &'static str {
        match self {
            Self::Spotify => "/player/convertSpotifyToYoutube",
            Self::YouTube => "/player/convertYoutubeToSpotify",
        }
    }

    /// Menu button label.
    #[must_use]
    pub const fn action_label(self) -> &'static str {
        match self {
            Self::Spotify => "Convert Spotify Playlist To Youtube",
            Self::YouTube => "Convert Youtube Playlist To Spotify",
        }
    }

    /// Field descriptors for this platform, before mode filtering.
    #[must_use]
    pub const fn fields(self) -> &'static [FieldDescriptor] {
        match self {
            Self::Spotify => SPOTIFY_FIELDS,
            Self::YouTube => YOUTUBE_FIELDS,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spotify => write!(f, "spotify"),
            Self::YouTube => write!(f, "youtube"),
        }
    }
}

/// Whether the conversion creates a new playlist or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Sync into an existing destination playlist.
    Update,
    /// Create a new destination playlist.
    Create,
}

impl Mode {
    /// Both modes, in chooser order.
    pub const ALL: [Self; 2] = [Self::Update, Self::Create];

    /// Mode chooser button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Update => "Update Existing Playlist",
            Self::Create => "Create New Playlist",
        }
    }
}

/// Input control used for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line text input.
    Text,
    /// Multi-line text input.
    TextArea,
    /// Choice among [`SELECT_OPTIONS`].
    Select,
}

/// Which modes a field appears in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldScope {
    Always,
    CreateOnly,
    UpdateOnly,
}

/// One step of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Display label; also the form-state key.
    pub label: &'static str,
    /// Input control.
    pub kind: FieldKind,
    /// Query parameter the value is sent as, if any.
    pub param: Option<&'static str>,
    scope: FieldScope,
}

impl FieldDescriptor {
    const fn new(
        label: &'static str,
        kind: FieldKind,
        param: Option<&'static str>,
        scope: FieldScope,
    ) -> Self {
        Self {
            label,
            kind,
            param,
            scope,
        }
    }

    /// Whether this field is asked in `mode`.
    #[must_use]
    pub fn applies_to(&self, mode: Mode) -> bool {
        match self.scope {
            FieldScope::Always => true,
            FieldScope::CreateOnly => mode == Mode::Create,
            FieldScope::UpdateOnly => mode == Mode::Update,
        }
    }

    /// Input placeholder.
    #[must_use]
    pub fn placeholder(&self) -> String {
        format!("Enter {}", self.label)
    }
}

/// Option of a select field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    /// Visible label.
    pub label: &'static str,
    /// Submitted value.
    pub value: &'static str,
}

/// Label of the button that goes back one field.
pub const PREVIOUS_LABEL: &str = "Previous";
/// Label of the forward button before the last field.
pub const NEXT_LABEL: &str = "Next";
/// Label of the forward button on the last field.
pub const SUBMIT_LABEL: &str = "Submit";

/// Options offered by every select field. The first one is a placeholder.
pub const SELECT_OPTIONS: &[SelectOption] = &[
    SelectOption {
        label: "Choose",
        value: "",
    },
    SelectOption {
        label: "Yes",
        value: "Public",
    },
    SelectOption {
        label: "No",
        value: "Private",
    },
];

const SPOTIFY_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new(
        "Spotify Playlist Link",
        FieldKind::Text,
        Some("param"),
        FieldScope::Always,
    ),
    FieldDescriptor::new(
        "Existing Youtube Playlist Link",
        FieldKind::Text,
        Some("existing_param"),
        FieldScope::UpdateOnly,
    ),
    FieldDescriptor::new(
        "Name of New Playlist",
        FieldKind::Text,
        Some("name"),
        FieldScope::CreateOnly,
    ),
    FieldDescriptor::new(
        "Collaborative",
        FieldKind::Select,
        Some("collaborative"),
        FieldScope::CreateOnly,
    ),
    FieldDescriptor::new(
        "Description Of The Playlist",
        FieldKind::TextArea,
        Some("description"),
        FieldScope::CreateOnly,
    ),
    // The backend has no parameter for visibility yet.
    FieldDescriptor::new(
        "Make Your Playlist Available To The Public",
        FieldKind::Select,
        None,
        FieldScope::CreateOnly,
    ),
];

const YOUTUBE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new(
        "Youtube Playlist Link",
        FieldKind::Text,
        Some("param"),
        FieldScope::Always,
    ),
    FieldDescriptor::new(
        "Existing Spotify Playlist Link",
        FieldKind::Text,
        Some("existing_param"),
        FieldScope::UpdateOnly,
    ),
    FieldDescriptor::new(
        "Name of New Playlist",
        FieldKind::Text,
        Some("name"),
        FieldScope::CreateOnly,
    ),
    FieldDescriptor::new(
        "Description Of The Playlist",
        FieldKind::TextArea,
        Some("description"),
        FieldScope::CreateOnly,
    ),
];

/// Field descriptors asked for `platform` in `mode`, in order.
#[must_use]
pub fn fields_for(platform: Platform, mode: Mode) -> Vec<&'static FieldDescriptor> {
    platform
        .fields()
        .iter()
        .filter(|field| field.applies_to(mode))
        .collect()
}

/// Values entered so far, keyed by field label.
pub type FormState = BTreeMap<String, String>;

/// Where the wizard currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    /// Waiting for the user to pick create or update.
    ModeSelection,
    /// Showing the field at `step`.
    Editing {
        /// Index into the filtered field list.
        step: usize,
    },
    /// The request built from the last step is in flight.
    Submitting {
        /// Step to return to once the request settles.
        step: usize,
    },
}

/// Result of a successful [`ConversionWizard::next`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved to another field.
    Moved {
        /// The new step.
        step: usize,
    },
    /// The last field was filled; send this request.
    Submit(ConversionRequest),
}

/// Local validation failures. None of these touch the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// The current field is empty.
    #[error("Please fill in the {field} field.")]
    EmptyField {
        /// Label of the empty field.
        field: &'static str,
    },
    /// No mode has been chosen yet.
    #[error("Choose whether to create or update a playlist first.")]
    ModeNotSelected,
    /// A request is already in flight.
    #[error("A conversion is already being submitted.")]
    AlreadySubmitting,
    /// There is no request in flight to finish.
    #[error("No conversion is being submitted.")]
    NotSubmitting,
}

/// State machine behind the conversion form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionWizard {
    platform: Platform,
    mode: Option<Mode>,
    state: WizardState,
    form: FormState,
}

impl ConversionWizard {
    /// Start a wizard for `platform` in mode selection with an empty form.
    #[must_use]
    pub const fn new(platform: Platform) -> Self {
        Self {
            platform,
            mode: None,
            state: WizardState::ModeSelection,
            form: BTreeMap::new(),
        }
    }

    /// Selected platform.
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Chosen mode, if any.
    pub const fn mode(&self) -> Option<Mode> {
        self.mode
    }

    /// Current state.
    pub const fn state(&self) -> WizardState {
        self.state
    }

    /// Current step (0 before a mode is chosen).
    pub const fn step(&self) -> usize {
        match self.state {
            WizardState::ModeSelection => 0,
            WizardState::Editing { step } | WizardState::Submitting { step } => step,
        }
    }

    /// Values entered so far.
    pub const fn form(&self) -> &FormState {
        &self.form
    }

    /// Whether a request is in flight.
    pub const fn is_submitting(&self) -> bool {
        matches!(self.state, WizardState::Submitting { .. })
    }

    /// Field descriptors for the current platform and mode.
    pub fn fields(&self) -> Vec<&'static FieldDescriptor> {
        self.mode
            .map(|mode| fields_for(self.platform, mode))
            .unwrap_or_default()
    }

    /// Field shown at the current step.
    pub fn current_field(&self) -> Option<&'static FieldDescriptor> {
        match self.state {
            WizardState::ModeSelection => None,
            WizardState::Editing { step } | WizardState::Submitting { step } => {
                self.fields().get(step).copied()
            }
        }
    }

    /// Whether the current step is the last one ("Submit" instead of "Next").
    pub fn is_last_step(&self) -> bool {
        let count = self.fields().len();
        count > 0 && self.mode.is_some() && self.step() + 1 == count
    }

    /// Whether "Previous" is available.
    pub const fn can_go_back(&self) -> bool {
        matches!(self.state, WizardState::Editing { step } if step > 0)
    }

    /// Label of the forward button.
    pub fn next_label(&self) -> &'static str {
        if self.is_last_step() { SUBMIT_LABEL } else { NEXT_LABEL }
    }

    /// Value entered for `label`, or an empty string.
    pub fn value(&self, label: &str) -> &str {
        self.form.get(label).map_or("", String::as_str)
    }

    /// Switch platform. A different platform resets mode, step and form.
    ///
    /// Returns whether a reset happened.
    pub fn select_platform(&mut self, platform: Platform) -> bool {
        if platform == self.platform {
            return false;
        }
        debug!("Platform switched to {}, resetting form", platform);
        *self = Self::new(platform);
        true
    }

    /// Pick create or update and start at the first field.
    pub fn choose_mode(&mut self, mode: Mode) -> Result<(), WizardError> {
        if self.is_submitting() {
            return Err(WizardError::AlreadySubmitting);
        }
        self.mode = Some(mode);
        self.form.clear();
        self.state = WizardState::Editing { step: 0 };
        Ok(())
    }

    /// Store `value` for the current field.
    pub fn set_value(&mut self, value: impl Into<String>) -> Result<(), WizardError> {
        match self.state {
            WizardState::ModeSelection => Err(WizardError::ModeNotSelected),
            WizardState::Submitting { .. } => Err(WizardError::AlreadySubmitting),
            WizardState::Editing { .. } => {
                if let Some(field) = self.current_field() {
                    self.form.insert(field.label.to_string(), value.into());
                }
                Ok(())
            }
        }
    }

    /// Validate the current field and advance, or build the request on the
    /// last step. An empty field leaves step and form untouched.
    pub fn next(&mut self) -> Result<Advance, WizardError> {
        let step = match self.state {
            WizardState::ModeSelection => return Err(WizardError::ModeNotSelected),
            WizardState::Submitting { .. } => return Err(WizardError::AlreadySubmitting),
            WizardState::Editing { step } => step,
        };
        let fields = self.fields();
        let Some(field) = fields.get(step) else {
            return Err(WizardError::ModeNotSelected);
        };
        if self.value(field.label).is_empty() {
            return Err(WizardError::EmptyField { field: field.label });
        }

        if step + 1 < fields.len() {
            self.state = WizardState::Editing { step: step + 1 };
            return Ok(Advance::Moved { step: step + 1 });
        }

        debug!("Form submitted: {:?}", self.form);
        let request = self.build_request();
        self.state = WizardState::Submitting { step };
        Ok(Advance::Submit(request))
    }

    /// Go back one field. Returns whether the step changed.
    pub fn previous(&mut self) -> bool {
        match self.state {
            WizardState::Editing { step } if step > 0 => {
                self.state = WizardState::Editing { step: step - 1 };
                true
            }
            _ => false,
        }
    }

    /// Leave the submitting state once the request settled, success or not.
    /// The form is left as it was.
    pub fn finish_submission(&mut self) -> Result<(), WizardError> {
        match self.state {
            WizardState::Submitting { step } => {
                self.state = WizardState::Editing { step };
                Ok(())
            }
            _ => Err(WizardError::NotSubmitting),
        }
    }

    fn build_request(&self) -> ConversionRequest {
        self.fields()
            .into_iter()
            .filter_map(|field| Some((field.param?, self.value(field.label))))
            .filter(|(_, value)| !value.is_empty())
            .fold(ConversionRequest::new(self.platform), |request, (param, value)| {
                request.with_param(param, value)
            })
    }
}
