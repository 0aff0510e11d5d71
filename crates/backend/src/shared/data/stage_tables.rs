use contracts::enums::stage_label::StageLabel;
use contracts::shared::table::Table;
use contracts::usecases::u601_import_from_monday::response::StageSummary;
use std::collections::HashMap;

static EMPTY_TABLE: Table = Table::empty();

/// One table per pipeline stage; a stage that was never inserted reads as empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageTables {
    tables: HashMap<StageLabel, Table>,
}

impl StageTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, stage: StageLabel, table: Table) {
        self.tables.insert(stage, table);
    }

    pub fn get(&self, stage: StageLabel) -> &Table {
        self.tables.get(&stage).unwrap_or(&EMPTY_TABLE)
    }

    /// Row count per stage, in board order
    pub fn summary(&self) -> Vec<StageSummary> {
        StageLabel::all()
            .into_iter()
            .map(|stage| StageSummary {
                stage,
                rows: self.get(stage).len(),
            })
            .collect()
    }
}

impl FromIterator<(StageLabel, Table)> for StageTables {
    fn from_iter<I: IntoIterator<Item = (StageLabel, Table)>>(iter: I) -> Self {
        Self {
            tables: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_stage_reads_as_empty_table() {
        let mut table = Table::new(vec!["Owner".into()]);
        table.push_row(vec!["Alice".into()]);
        let stages: StageTables = [(StageLabel::Won, table)].into_iter().collect();

        assert_eq!(stages.get(StageLabel::Won).len(), 1);
        assert!(stages.get(StageLabel::Noshow).is_empty());

        let summary = stages.summary();
        assert_eq!(summary.len(), 7);
        assert_eq!(summary[2].stage, StageLabel::Won);
        assert_eq!(summary[2].rows, 1);
        assert_eq!(summary[0].rows, 0);
    }
}
