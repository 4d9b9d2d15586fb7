//! Tabular renditions of lottery outcomes and odds matrices.

use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Col, Row, Table};

use crate::linear::Matrix;
use crate::lottery::Lottery;
use crate::participant::Participant;
use crate::scheme::Weight;

pub fn percent(prob: f64) -> String {
    format!("{:.2}%", prob * 100.0)
}

/// The draft order, one row per pick, with the odds each drafted participant had.
pub fn tabulate_draft(lottery: &Lottery) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(12)).with(Left)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Rank".into(),
                "Manager".into(),
                "Balls".into(),
                "Odds of 1st Overall".into(),
                "Odds of This Pick".into(),
            ],
        ));
    for entry in lottery.entries() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}", entry.pick + 1).into(),
                entry.participant.to_string().into(),
                format!("{}", entry.weight).into(),
                percent(entry.first_pick_odds).into(),
                percent(entry.this_pick_odds).into(),
            ],
        ));
    }
    table
}

/// A full odds matrix: one row per participant in seed order, one column per pick.
pub fn tabulate_odds(participants: &[Participant], weights: &[Weight], odds: &Matrix<f64>) -> Table {
    debug_assert_eq!(participants.len(), odds.rows());
    let mut table = Table::default()
        .with_cols({
            let mut cols = vec![
                Col::new(Styles::default().with(MinWidth(4)).with(HAlign::Right)),
                Col::new(Styles::default().with(MinWidth(12)).with(Left)),
                Col::new(
                    Styles::default()
                        .with(Separator(true))
                        .with(MinWidth(5))
                        .with(HAlign::Right),
                ),
            ];
            for _ in 0..odds.cols() {
                cols.push(Col::new(
                    Styles::default().with(MinWidth(7)).with(HAlign::Right),
                ));
            }
            cols
        })
        .with_row({
            let mut header_cells = vec!["Seed".into(), "Manager".into(), "Balls".into()];
            for pick in 0..odds.cols() {
                header_cells.push(format!("Pick {}", pick + 1).into());
            }
            Row::new(Styles::default().with(Header(true)), header_cells)
        });

    for (seed, participant) in participants.iter().enumerate() {
        let mut row_cells = vec![
            format!("{}", seed + 1).into(),
            participant.to_string().into(),
            format!("{}", weights[seed]).into(),
        ];
        for &prob in &odds[seed] {
            row_cells.push(percent(prob).into());
        }
        table.push_row(Row::new(Styles::default(), row_cells));
    }
    table
}
