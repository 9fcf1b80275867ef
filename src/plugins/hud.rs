//! HUD (Heads-Up Display) module.
//!
//! Overlays the live readouts for the two-body simulation:
//!
//! - **Telemetry**: force on each body, mass ratio, current masses, orbit
//!   radius, and a legend matching each arrow colour to its label
//! - **Change banner**: "Force Increased ↑" / "Force Decreased ↓" while visible
//! - **Formula panel**: the proportionality, or Newton's law once math mode
//!   or the tutorial reaches it, with the current values substituted
//! - **Learning panel**: title, text and progress of the current tutorial step
//!
//! Every text node carries a [`HudField`] and is rewritten from the latest
//! frame by a single system; panels carry a [`HudPanel`] and are shown or
//! hidden from the learning and banner state.

use crate::feedback::ChangeDirection;
use crate::format::{formula_result, formula_substitution, mass_ratio, to_fixed};
use crate::plugins::scene::ForceArrow;
use crate::prelude::*;

const PANEL_BACKGROUND: Color = Color::srgba(0.06, 0.09, 0.16, 0.85);
const LABEL_COLOR: Color = Color::srgb(0.58, 0.64, 0.72);
const VALUE_COLOR: Color = Color::WHITE;
const INCREASED_COLOR: Color = Color::srgb(0.133, 0.773, 0.369);
const DECREASED_COLOR: Color = Color::srgb(0.937, 0.267, 0.267);
const HIGHLIGHT_COLOR: Color = Color::srgba(0.23, 0.51, 0.96, 0.35);
const HIGHLIGHT_BORDER_COLOR: Color = Color::srgb(0.23, 0.51, 0.96);

const PROPORTIONAL_LAW: &str = "F ∝ (m₁ · m₂) / r²";
const EXACT_LAW: &str = "F = G · (m₁ · m₂) / r²";

/// Which value a HUD text node displays
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudField {
    ForceOnSecondary,
    ForceOnPrimary,
    MassRatio,
    PrimaryMass,
    SecondaryMass,
    OrbitRadius,
    OrbitStatus,
    Banner,
    FormulaLaw,
    FormulaSubstitution,
    FormulaResult,
    StepTitle,
    StepDescription,
    StepProgress,
}

/// Panels whose visibility follows the simulation and learning state
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudPanel {
    Banner,
    Formula,
    /// "Force ∝ Masses / Distance²" under the proportionality
    ProportionalityNote,
    /// Substitution and result lines
    Calculation,
    Learning,
}

/// Telemetry rows for the adjustable variables, highlighted on the first
/// tutorial step
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct VariableRow;

/// Colour swatch in the telemetry legend for one force arrow
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrowLegend {
    pub arrow: ForceArrow,
}

/// Current text for `field`
pub fn field_text(
    field: HudField,
    frame: &Frame,
    state: &SimulationState,
    learning: &LearningMode,
) -> String {
    match field {
        HudField::ForceOnSecondary | HudField::ForceOnPrimary => frame.force_text(),
        HudField::MassRatio => mass_ratio(frame.primary.mass, frame.secondary.mass),
        HudField::PrimaryMass => to_fixed(frame.primary.mass, 1),
        HudField::SecondaryMass => to_fixed(frame.secondary.mass, 1),
        HudField::OrbitRadius => to_fixed(frame.orbit_radius, 1),
        HudField::OrbitStatus => {
            if frame.is_orbiting {
                "Orbiting".to_string()
            } else {
                "Paused".to_string()
            }
        }
        HudField::Banner => frame
            .banner
            .as_ref()
            .map(|banner| banner.text.clone())
            .unwrap_or_default(),
        HudField::FormulaLaw => {
            if learning.shows_exact_law() {
                EXACT_LAW.to_string()
            } else {
                PROPORTIONAL_LAW.to_string()
            }
        }
        HudField::FormulaSubstitution => formula_substitution(
            state.gravity().gravitational_constant,
            state.primary().mass(),
            state.secondary().mass(),
            state.orbit().radius,
        ),
        HudField::FormulaResult => formula_result(state.formula_force()),
        HudField::StepTitle => learning.current_step().title.to_string(),
        HudField::StepDescription => learning.current_step().description.to_string(),
        HudField::StepProgress => learning.progress_label(),
    }
}

pub fn panel_visible(panel: HudPanel, frame: &Frame, learning: &LearningMode) -> bool {
    match panel {
        HudPanel::Banner => frame.force.change_event_active,
        HudPanel::Formula => true,
        HudPanel::ProportionalityNote => !learning.shows_exact_law(),
        HudPanel::Calculation => learning.shows_calculation(),
        HudPanel::Learning => learning.is_enabled(),
    }
}

pub fn banner_color(direction: ChangeDirection) -> Color {
    match direction {
        ChangeDirection::Increased => INCREASED_COLOR,
        ChangeDirection::Decreased => DECREASED_COLOR,
    }
}

pub struct HudPlugin;

impl HudPlugin {
    fn spawn_hud(mut commands: Commands, config: Res<NewtonLabConfig>) {
        let ui = &config.ui;
        let label_font = TextFont::from_font_size(ui.font_size - 2.0);
        let value_font = TextFont::from_font_size(ui.font_size + 4.0);
        let body_font = TextFont::from_font_size(ui.font_size);
        let border_radius = BorderRadius::all(Val::Px(ui.panel_border_radius));
        let background_color = BackgroundColor(PANEL_BACKGROUND);

        let panel_node = |top: Val, right: Val, bottom: Val, left: Val| Node {
            position_type: PositionType::Absolute,
            top,
            right,
            bottom,
            left,
            padding: UiRect::all(Val::Px(ui.panel_padding)),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            ..default()
        };
        let row_node = Node {
            display: Display::Flex,
            justify_content: JustifyContent::SpaceBetween,
            align_items: AlignItems::Baseline,
            column_gap: Val::Px(20.0),
            padding: UiRect::horizontal(Val::Px(4.0)),
            ..default()
        };

        let row = |label: &str, field: HudField, unit: &str| {
            (
                row_node.clone(),
                children![
                    (Text::new(label), label_font.clone(), TextColor(LABEL_COLOR)),
                    (
                        Node {
                            column_gap: Val::Px(4.0),
                            align_items: AlignItems::Baseline,
                            ..default()
                        },
                        children![
                            (
                                field,
                                Text::new("-"),
                                value_font.clone(),
                                TextColor(VALUE_COLOR)
                            ),
                            (Text::new(unit), label_font.clone(), TextColor(LABEL_COLOR)),
                        ],
                    ),
                ],
            )
        };

        let legend = |rooted_at: BodyRole| {
            let arrow = ForceArrow { rooted_at };
            (
                Node {
                    column_gap: Val::Px(8.0),
                    align_items: AlignItems::Center,
                    padding: UiRect::horizontal(Val::Px(4.0)),
                    ..default()
                },
                children![
                    (
                        ArrowLegend { arrow },
                        Node {
                            width: Val::Px(16.0),
                            height: Val::Px(4.0),
                            ..default()
                        },
                        BackgroundColor(arrow.color()),
                    ),
                    (
                        Text::new(arrow.label()),
                        label_font.clone(),
                        TextColor(LABEL_COLOR)
                    ),
                ],
            )
        };

        commands.spawn((
            Name::new("Telemetry"),
            panel_node(Val::Px(12.0), Val::Auto, Val::Auto, Val::Px(12.0)),
            border_radius,
            background_color,
            children![
                (
                    Text::new("LIVE TELEMETRY"),
                    label_font.clone(),
                    TextColor(HIGHLIGHT_BORDER_COLOR)
                ),
                row("Force on Moon (F₂)", HudField::ForceOnSecondary, "N"),
                row("Force on Earth (F₁)", HudField::ForceOnPrimary, "N"),
                row("Mass ratio m₁:m₂", HudField::MassRatio, ": 1"),
                (
                    Node {
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(2.0),
                        ..default()
                    },
                    children![legend(BodyRole::Primary), legend(BodyRole::Secondary)],
                ),
                (
                    VariableRow,
                    BackgroundColor(Color::NONE),
                    row("Earth mass m₁ (↑/↓)", HudField::PrimaryMass, "")
                ),
                (
                    VariableRow,
                    BackgroundColor(Color::NONE),
                    row("Moon mass m₂ (←/→)", HudField::SecondaryMass, "")
                ),
                (
                    VariableRow,
                    BackgroundColor(Color::NONE),
                    row("Orbit radius r (-/=)", HudField::OrbitRadius, "")
                ),
                row("Orbit", HudField::OrbitStatus, ""),
            ],
        ));

        commands.spawn((
            Name::new("Change Banner"),
            HudPanel::Banner,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                display: Display::None,
                ..default()
            },
            children![(
                Node {
                    padding: UiRect::axes(Val::Px(16.0), Val::Px(8.0)),
                    ..default()
                },
                border_radius,
                background_color,
                children![(
                    HudField::Banner,
                    Text::new(""),
                    TextFont::from_font_size(ui.font_size + 8.0),
                    TextColor(INCREASED_COLOR),
                )],
            )],
        ));

        commands.spawn((
            Name::new("Formula"),
            HudPanel::Formula,
            panel_node(Val::Px(12.0), Val::Px(12.0), Val::Auto, Val::Auto),
            border_radius,
            background_color,
            BorderColor(Color::NONE),
            children![
                (
                    Text::new("GRAVITY EQUATION"),
                    label_font.clone(),
                    TextColor(HIGHLIGHT_BORDER_COLOR)
                ),
                (
                    HudField::FormulaLaw,
                    Text::new(PROPORTIONAL_LAW),
                    value_font.clone(),
                    TextColor(VALUE_COLOR)
                ),
                (
                    HudPanel::ProportionalityNote,
                    Text::new("Force ∝ Masses / Distance²"),
                    body_font.clone(),
                    TextColor(LABEL_COLOR)
                ),
                (
                    HudPanel::Calculation,
                    Node {
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(4.0),
                        display: Display::None,
                        ..default()
                    },
                    children![
                        (
                            HudField::FormulaSubstitution,
                            Text::new("-"),
                            body_font.clone(),
                            TextColor(LABEL_COLOR)
                        ),
                        (
                            HudField::FormulaResult,
                            Text::new("-"),
                            value_font.clone(),
                            TextColor(VALUE_COLOR)
                        ),
                    ],
                ),
            ],
        ));

        commands.spawn((
            Name::new("Learning"),
            HudPanel::Learning,
            panel_node(Val::Auto, Val::Px(12.0), Val::Px(12.0), Val::Auto),
            border_radius,
            background_color,
            children![
                (
                    HudField::StepProgress,
                    Text::new("-"),
                    label_font.clone(),
                    TextColor(HIGHLIGHT_BORDER_COLOR)
                ),
                (
                    HudField::StepTitle,
                    Text::new("-"),
                    value_font.clone(),
                    TextColor(VALUE_COLOR)
                ),
                (
                    HudField::StepDescription,
                    Text::new("-"),
                    body_font.clone(),
                    TextColor(LABEL_COLOR)
                ),
                (
                    Text::new("[ previous   ] next   L exit"),
                    label_font.clone(),
                    TextColor(LABEL_COLOR)
                ),
            ],
        ));
    }

    fn update_field_text(
        latest_frame: Res<LatestFrame>,
        state: Res<SimulationState>,
        learning: Res<LearningMode>,
        mut fields: Query<(&HudField, &mut Text, &mut TextColor)>,
    ) {
        let Some(frame) = &latest_frame.0 else {
            return;
        };

        for (field, mut text, mut color) in &mut fields {
            let value = field_text(*field, frame, &state, &learning);
            if **text != value {
                **text = value;
            }

            if *field == HudField::Banner {
                if let Some(banner) = &frame.banner {
                    color.0 = banner_color(banner.direction);
                }
            }
        }
    }

    fn update_panel_visibility(
        latest_frame: Res<LatestFrame>,
        learning: Res<LearningMode>,
        mut panels: Query<(&HudPanel, &mut Node)>,
    ) {
        let Some(frame) = &latest_frame.0 else {
            return;
        };

        for (panel, mut node) in &mut panels {
            let display = if panel_visible(*panel, frame, &learning) {
                Display::Flex
            } else {
                Display::None
            };
            if node.display != display {
                node.display = display;
            }
        }
    }

    fn update_learning_highlights(
        learning: Res<LearningMode>,
        mut rows: Query<&mut BackgroundColor, With<VariableRow>>,
        mut formula_panels: Query<(&HudPanel, &mut BorderColor, &mut Node)>,
    ) {
        if !learning.is_changed() {
            return;
        }

        let row_color = if learning.highlights_variables() {
            HIGHLIGHT_COLOR
        } else {
            Color::NONE
        };
        for mut background in &mut rows {
            background.0 = row_color;
        }

        for (panel, mut border, mut node) in &mut formula_panels {
            if *panel != HudPanel::Formula {
                continue;
            }
            if learning.highlights_formula() {
                border.0 = HIGHLIGHT_BORDER_COLOR;
                node.border = UiRect::all(Val::Px(2.0));
            } else {
                border.0 = Color::NONE;
                node.border = UiRect::ZERO;
            }
        }
    }
}

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, Self::spawn_hud);
        app.add_systems(
            Update,
            (
                Self::update_field_text,
                Self::update_panel_visibility,
                Self::update_learning_highlights,
            )
                .chain()
                .in_set(SimulationSet::Publish),
        );
    }
}
