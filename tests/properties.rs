//! Property-based tests for sync codes, history and reordering.

use pagewright::constants::HISTORY_LIMIT;
use pagewright::models::{
    Color, ElementKind, ElementStylePatch, NewSection, SectionStylePatch, SiteConfiguration,
    SitePatch,
};
use pagewright::services::history::History;
use pagewright::services::mutations::{self, Direction};
use pagewright::services::sync_codec;
use proptest::prelude::*;

/// One random edit.
#[derive(Debug, Clone)]
enum Edit {
    AddElement(usize, ElementKind),
    DuplicateSection(usize),
    Disable(usize),
    Move(usize, bool),
    Rename(String),
    AddSection(String),
    Recolor(usize, u8, u8, u8),
    Nudge(usize, f64, f64),
}

fn kind() -> impl Strategy<Value = ElementKind> {
    prop_oneof![
        Just(ElementKind::Text),
        Just(ElementKind::Image),
        Just(ElementKind::Logo),
    ]
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0..12usize, kind()).prop_map(|(i, k)| Edit::AddElement(i, k)),
        (0..12usize).prop_map(Edit::DuplicateSection),
        (0..12usize).prop_map(Edit::Disable),
        (0..12usize, any::<bool>()).prop_map(|(i, up)| Edit::Move(i, up)),
        any::<String>().prop_map(Edit::Rename),
        "[a-zA-Z áéíóúñ]{1,24}".prop_map(Edit::AddSection),
        (0..12usize, any::<u8>(), any::<u8>(), any::<u8>())
            .prop_map(|(i, r, g, b)| Edit::Recolor(i, r, g, b)),
        (0..12usize, -2000.0..2000.0f64, -2000.0..2000.0f64)
            .prop_map(|(i, x, y)| Edit::Nudge(i, x, y)),
    ]
}

fn section_id(config: &SiteConfiguration, index: usize) -> String {
    config
        .sections
        .get(index % config.sections.len())
        .map(|s| s.id.clone())
        .unwrap_or_default()
}

fn apply(config: &SiteConfiguration, edit: &Edit) -> SiteConfiguration {
    match edit {
        Edit::AddElement(i, kind) => mutations::add_element(config, &section_id(config, *i), *kind),
        Edit::DuplicateSection(i) => mutations::duplicate_section(config, &section_id(config, *i)),
        Edit::Disable(i) => mutations::disable_section(config, &section_id(config, *i)),
        Edit::Move(i, up) => {
            let direction = if *up { Direction::Up } else { Direction::Down };
            mutations::move_section(config, *i, direction)
        }
        Edit::Rename(name) => mutations::update_site(
            config,
            &SitePatch {
                site_name: Some(name.clone()),
                ..SitePatch::default()
            },
        ),
        Edit::AddSection(title) => mutations::add_section(
            config,
            &NewSection {
                nav_label: title.clone(),
                title: title.clone(),
                description: String::new(),
            },
        ),
        Edit::Recolor(i, r, g, b) => mutations::update_section_style(
            config,
            &section_id(config, *i),
            &SectionStylePatch {
                bg_color: Some(Color::rgb(*r, *g, *b)),
                ..SectionStylePatch::default()
            },
        ),
        Edit::Nudge(i, x, y) => {
            let section = section_id(config, *i);
            let Some(element) = config.section(&section).and_then(|s| s.elements.first()) else {
                return config.clone();
            };
            let element = element.id.clone();
            mutations::update_element_style(
                config,
                &section,
                &element,
                &ElementStylePatch::position(*x, *y),
            )
        }
    }
}

fn edited_config() -> impl Strategy<Value = SiteConfiguration> {
    prop::collection::vec(edit(), 0..16).prop_map(|edits| {
        edits
            .iter()
            .fold(SiteConfiguration::default(), |config, edit| apply(&config, edit))
    })
}

proptest! {
    #[test]
    fn prop_sync_code_round_trips(config in edited_config()) {
        let code = sync_codec::encode(&config).unwrap();
        prop_assert!(code.chars().all(|c| c.is_ascii_graphic()));
        prop_assert_eq!(sync_codec::decode(&code).unwrap(), config);
    }

    #[test]
    fn prop_history_never_exceeds_limit(pushes in 0..40usize) {
        let mut history = History::new();
        for n in 0..pushes {
            history.push(SiteConfiguration {
                site_name: n.to_string(),
                ..SiteConfiguration::default()
            });
        }

        prop_assert_eq!(history.len(), pushes.min(HISTORY_LIMIT));
        if pushes > 0 {
            let head = (pushes - 1).to_string();
            prop_assert_eq!(history.peek().map(|c| c.site_name.as_str()), Some(head.as_str()));
        }
    }

    #[test]
    fn prop_move_keeps_section_set(config in edited_config(), index in 0..12usize, up in any::<bool>()) {
        let direction = if up { Direction::Up } else { Direction::Down };
        let next = mutations::move_section(&config, index, direction);

        let mut before: Vec<_> = config.sections.iter().map(|s| s.id.clone()).collect();
        let mut after: Vec<_> = next.sections.iter().map(|s| s.id.clone()).collect();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn prop_move_up_then_down_is_identity(config in edited_config(), index in 1..12usize) {
        prop_assume!(index < config.sections.len());
        let moved = mutations::move_section(&config, index, Direction::Up);
        let back = mutations::move_section(&moved, index - 1, Direction::Down);
        prop_assert_eq!(back, config);
    }
}
