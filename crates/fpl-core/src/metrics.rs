// Headline metrics: extrema lookups over the filtered view.
//
// Every lookup returns `None` on an empty view; cards render a placeholder.
// Ties on the maximum go to the lowest player id.

use crate::derive::WorkingPlayer;

/// Text shown in a metric card when the filtered view is empty.
pub const PLACEHOLDER: &str = "—";

/// Metrics keyed on the player with the highest value.
#[derive(Debug, Clone, PartialEq)]
pub struct MvpMetrics {
    pub player: String,
    pub value: f64,
    pub team: String,
    pub cost: i64,
}

/// Metrics keyed on selection and transfer maxima.
#[derive(Debug, Clone, PartialEq)]
pub struct PopularityMetrics {
    pub most_popular: String,
    pub most_selected_percent: f64,
    pub most_transferred_in: String,
    pub most_transferred_out: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Headline {
    pub mvp: Option<MvpMetrics>,
    pub popularity: Option<PopularityMetrics>,
}

/// One labelled, formatted metric display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    pub label: &'static str,
    pub text: String,
}

/// The row attaining the maximum of `key`; lowest id among equals.
pub fn argmax_by<'a, F>(rows: &[&'a WorkingPlayer], key: F) -> Option<&'a WorkingPlayer>
where
    F: Fn(&WorkingPlayer) -> f64,
{
    rows.iter().copied().fold(None, |best, row| match best {
        None => Some(row),
        Some(current) => {
            let (k_row, k_cur) = (key(row), key(current));
            if k_row > k_cur || (k_row == k_cur && row.player.id < current.player.id) {
                Some(row)
            } else {
                Some(current)
            }
        }
    })
}

/// Compute the headline metrics for a filtered view.
pub fn compute_headline(rows: &[&WorkingPlayer]) -> Headline {
    let mvp = argmax_by(rows, |p| p.value).map(|p| MvpMetrics {
        player: p.player.web_name.clone(),
        value: p.value,
        team: p.team_label().to_string(),
        cost: p.player.now_cost,
    });

    let popularity = argmax_by(rows, |p| p.player.selected_by_percent).and_then(|popular| {
        let most_in = argmax_by(rows, |p| p.player.transfers_in as f64)?;
        let most_out = argmax_by(rows, |p| p.player.transfers_out as f64)?;
        Some(PopularityMetrics {
            most_popular: popular.player.web_name.clone(),
            most_selected_percent: popular.player.selected_by_percent,
            most_transferred_in: most_in.player.web_name.clone(),
            most_transferred_out: most_out.player.web_name.clone(),
        })
    });

    Headline { mvp, popularity }
}

impl Headline {
    /// The eight metric cards in display order.
    pub fn cards(&self, currency_prefix: &str) -> [MetricCard; 8] {
        let mvp = self.mvp.as_ref();
        let pop = self.popularity.as_ref();
        let or_placeholder = |text: Option<String>| text.unwrap_or_else(|| PLACEHOLDER.to_string());

        [
            MetricCard {
                label: "MVP Player",
                text: or_placeholder(mvp.map(|m| m.player.clone())),
            },
            MetricCard {
                label: "MVP Value",
                text: or_placeholder(mvp.map(|m| format!("{:.1}", m.value))),
            },
            MetricCard {
                label: "MVP Team",
                text: or_placeholder(mvp.map(|m| m.team.clone())),
            },
            MetricCard {
                label: "MVP Cost",
                text: or_placeholder(mvp.map(|m| format!("{currency_prefix}{}", m.cost))),
            },
            MetricCard {
                label: "Most Popular Player",
                text: or_placeholder(pop.map(|m| m.most_popular.clone())),
            },
            MetricCard {
                label: "Most Selected %",
                text: or_placeholder(pop.map(|m| format!("{:.1}%", m.most_selected_percent))),
            },
            MetricCard {
                label: "Most Transferred In",
                text: or_placeholder(pop.map(|m| m.most_transferred_in.clone())),
            },
            MetricCard {
                label: "Most Transferred Out",
                text: or_placeholder(pop.map(|m| m.most_transferred_out.clone())),
            },
        ]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
