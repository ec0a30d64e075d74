//! # Section Presets
//!
//! Background configs of the portfolio's content sections. Each preset only
//! spells out what differs from [`FieldConfig::default`].
//!
//! | section     | count (wide/compact)         | radius | policy       |
//! |-------------|------------------------------|--------|--------------|
//! | hero        | 80, 50 < 1024, 25 < 640      | 120    | immediate    |
//! | about       | area / 15000, area / 30000   | 120    | immediate    |
//! | services    | area / 20000, area / 30000   | 120    | when-visible |
//! | skills      | area / 10000, area / 20000   | 150    | immediate    |
//! | career-path | area / 15000, area / 20000   | 150    | immediate    |
//! | experience  | 80, 30 < 768                 | 150/0  | when-visible |
//! | projects    | area / 12000, area / 25000   | 150    | immediate    |
//! | contact     | area / 15000, area / 25000   | 150    | immediate    |
//! | tech-stack  | symbol rain                                            |
//!
//! Unless noted, the compact tier starts below 768 px of viewport width.

use std::fmt;
use std::str::FromStr;

use crate::config::{CompactProfile, DensityRange, FieldConfig, MountPolicy, RainConfig, SizeRange};
use crate::error::{GlyphError, GlyphResult};
use crate::style::Color;

/// Words highlighted by the tech-stack rain.
pub const TECH_STACK_WORDS: [&str; 12] = [
    "React",
    "Node.js",
    "MongoDB",
    "Express",
    "JavaScript",
    "TypeScript",
    "TailwindCSS",
    "Git",
    "Vite",
    "Appwrite",
    "HTML5",
    "CSS3",
];

/// A hosting section of the portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Landing banner.
    Hero,
    /// About me.
    About,
    /// Services offered.
    Services,
    /// Skill bars.
    Skills,
    /// Education timeline.
    CareerPath,
    /// Work history.
    Experience,
    /// Project cards.
    Projects,
    /// Technology list.
    TechStack,
    /// Contact form.
    Contact,
}

impl Section {
    /// Every section, in page order.
    pub const ALL: [Self; 9] = [
        Self::Hero,
        Self::About,
        Self::Services,
        Self::Skills,
        Self::CareerPath,
        Self::Experience,
        Self::Projects,
        Self::TechStack,
        Self::Contact,
    ];

    /// Kebab-case name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::About => "about",
            Self::Services => "services",
            Self::Skills => "skills",
            Self::CareerPath => "career-path",
            Self::Experience => "experience",
            Self::Projects => "projects",
            Self::TechStack => "tech-stack",
            Self::Contact => "contact",
        }
    }

    /// Builds the section's background config.
    #[must_use]
    pub fn config(self) -> FieldConfig {
        match self {
            Self::Hero => FieldConfig {
                restoring_rate: 1.0 / 15.0,
                density_range: DensityRange { min: 1.0, max: 21.0 },
                target_frame_rate: Some(30),
                fixed_count: Some(80),
                compact: vec![compact_count(1024.0, 50), compact_count(640.0, 25)],
                ..FieldConfig::default()
            },
            Self::About => FieldConfig {
                color: Color::LIME.with_alpha(0.7),
                target_frame_rate: Some(30),
                compact: vec![compact_divisor(30_000.0)],
                ..FieldConfig::default()
            },
            Self::Services => FieldConfig {
                cell_density_divisor: 20_000.0,
                particle_size_range: SizeRange { min: 8.0, max: 12.0 },
                density_range: DensityRange { min: 5.0, max: 25.0 },
                color: Color::LIME.with_alpha(0.6),
                mount_policy: MountPolicy::WhenVisible,
                compact: vec![compact_divisor(30_000.0)],
                ..FieldConfig::default()
            },
            Self::Skills => FieldConfig {
                cell_density_divisor: 10_000.0,
                pointer_influence_radius: 150.0,
                compact: vec![compact_divisor(20_000.0)],
                ..FieldConfig::default()
            },
            Self::CareerPath => FieldConfig {
                pointer_influence_radius: 150.0,
                color: Color::LIME.with_alpha(0.7),
                compact: vec![compact_divisor(20_000.0)],
                ..FieldConfig::default()
            },
            Self::Experience => FieldConfig {
                pointer_influence_radius: 150.0,
                color: Color::LIME.with_alpha(0.7),
                fixed_count: Some(80),
                mount_policy: MountPolicy::WhenVisible,
                compact: vec![CompactProfile {
                    pointer_influence_radius: Some(0.0),
                    ..compact_count(768.0, 30)
                }],
                ..FieldConfig::default()
            },
            Self::Projects => FieldConfig {
                cell_density_divisor: 12_000.0,
                pointer_influence_radius: 150.0,
                color: Color::LIME.with_alpha(0.7),
                target_frame_rate: Some(30),
                compact: vec![compact_divisor(25_000.0)],
                ..FieldConfig::default()
            },
            Self::Contact => FieldConfig {
                pointer_influence_radius: 150.0,
                color: Color::LIME.with_alpha(0.7),
                compact: vec![compact_divisor(25_000.0)],
                ..FieldConfig::default()
            },
            Self::TechStack => FieldConfig {
                rain: RainConfig {
                    highlight_words: TECH_STACK_WORDS.iter().map(|w| (*w).to_owned()).collect(),
                    ..RainConfig::default()
                },
                compact: vec![CompactProfile {
                    column_width: Some(24.0),
                    tick_interval_ms: Some(50.0),
                    ..CompactProfile::default()
                }],
                ..FieldConfig::symbol_rain()
            },
        }
    }

    /// Looks up a section by name and returns its config.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphError::UnknownSection`] for unknown names.
    pub fn config_for(name: &str) -> GlyphResult<FieldConfig> {
        name.parse::<Self>().map(Self::config)
    }
}

fn compact_divisor(divisor: f32) -> CompactProfile {
    CompactProfile {
        cell_density_divisor: Some(divisor),
        ..CompactProfile::default()
    }
}

fn compact_count(breakpoint: f32, count: usize) -> CompactProfile {
    CompactProfile {
        breakpoint,
        fixed_count: Some(count),
        ..CompactProfile::default()
    }
}

impl FromStr for Section {
    type Err = GlyphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|section| section.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GlyphError::UnknownSection(s.to_owned()))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
