//! Project grid filtering.

pub const ALL: &str = "all";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    All,
    Category(String),
}

impl Filter {
    /// Read a button's `data-filter`. Missing or `"all"` means every card.
    pub fn parse(attr: Option<&str>) -> Self {
        match attr {
            None | Some(ALL) => Filter::All,
            Some(category) => Filter::Category(category.to_string()),
        }
    }

    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(wanted) => category == Some(wanted.as_str()),
        }
    }
}

/// What to do with one card once the exit animation finishes.
#[derive(Clone, Debug, PartialEq)]
pub struct CardPlan {
    pub index: usize,
    pub visible: bool,
    /// Stagger (seconds) before the card animates back in.
    pub delay: f64,
}

#[derive(Clone, Debug)]
pub struct ProjectFilter {
    buttons: Vec<Filter>,
    cards: Vec<Option<String>>,
    active: Option<usize>,
}

impl ProjectFilter {
    pub fn new(buttons: Vec<Filter>, cards: Vec<Option<String>>) -> Self {
        Self {
            buttons,
            cards,
            active: None,
        }
    }

    pub fn active_button(&self) -> Option<usize> {
        self.active
    }

    pub fn active_filter(&self) -> &Filter {
        const ALL_FILTER: &Filter = &Filter::All;
        self.active
            .and_then(|i| self.buttons.get(i))
            .unwrap_or(ALL_FILTER)
    }

    /// Activate button `index` and plan every card. Unknown indices are ignored.
    pub fn select(&mut self, index: usize) -> Option<Vec<CardPlan>> {
        self.buttons.get(index)?;
        self.active = Some(index);
        Some(self.plan())
    }

    pub fn plan(&self) -> Vec<CardPlan> {
        let filter = self.active_filter();
        self.cards
            .iter()
            .enumerate()
            .map(|(index, category)| CardPlan {
                index,
                visible: filter.matches(category.as_deref()),
                delay: crate::anim::stagger_delay(index, 0.1),
            })
            .collect()
    }

    pub fn visible(&self) -> Vec<usize> {
        self.plan()
            .into_iter()
            .filter(|p| p.visible)
            .map(|p| p.index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> ProjectFilter {
        ProjectFilter::new(
            vec![
                Filter::parse(Some("all")),
                Filter::parse(Some("web")),
                Filter::parse(Some("bot")),
            ],
            vec![Some("web".into()), Some("bot".into()), Some("web".into()), None],
        )
    }

    #[test]
    fn parse_treats_missing_as_all() {
        assert_eq!(Filter::parse(None), Filter::All);
        assert_eq!(Filter::parse(Some("web")), Filter::Category("web".into()));
    }

    #[test]
    fn category_filter_shows_only_matches() {
        let mut g = grid();
        let plan = g.select(1).unwrap();
        assert_eq!(g.active_button(), Some(1));
        assert_eq!(plan.iter().filter(|p| p.visible).count(), 2);
        assert_eq!(g.visible(), vec![0, 2]);
    }

    #[test]
    fn uncategorized_cards_only_show_under_all() {
        let mut g = grid();
        g.select(2);
        assert!(!g.visible().contains(&3));
        g.select(0);
        assert!(g.visible().contains(&3));
    }

    #[test]
    fn out_of_range_button_changes_nothing() {
        let mut g = grid();
        g.select(1);
        assert!(g.select(7).is_none());
        assert_eq!(g.active_button(), Some(1));
    }
}
