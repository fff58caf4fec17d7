use crate::types::*;
use comfy_table::{Cell, Table};

fn significance_marker(significant: bool) -> &'static str {
    if significant {
        "*"
    } else {
        ""
    }
}

impl VariableReport {
    /// Effect size with its magnitude label, e.g. `d = 0.612 (medium)`.
    pub fn effect_label(&self) -> String {
        let symbol = match self.primary_test {
            TestKind::WelchT => "d",
            TestKind::MannWhitneyU => "r",
            _ => "eta²",
        };
        match self.effect_magnitude {
            Some(magnitude) => format!("{} = {:.3} ({})", symbol, self.effect_size, magnitude),
            None => format!("{} = {:.3}", symbol, self.effect_size),
        }
    }
}

impl AnalysisReport {
    /// Prints the results as tables to stdout.
    pub fn summary(&self) {
        println!("Experiment Analysis Results");
        println!("========================================");
        println!(
            "alpha = {}, correction = {:?}, primary test = {:?}",
            self.config.alpha, self.config.correction, self.config.primary_test
        );
        println!();

        if !self.variables.is_empty() {
            let mut groups_table = Table::new();
            groups_table.set_header(vec![
                "Variable", "Group", "N", "Mean", "SD", "Median", "IQR", "Shapiro-Wilk W",
            ]);
            for variable in &self.variables {
                for group in &variable.groups {
                    let s = &group.summary;
                    let w = group
                        .normality
                        .as_ref()
                        .map_or_else(|| "-".to_string(), |sw| format!("{:.3}", sw.w()));
                    groups_table.add_row(vec![
                        Cell::new(&variable.name),
                        Cell::new(&group.label),
                        Cell::new(s.n()),
                        Cell::new(format!("{:.3}", s.mean())),
                        Cell::new(format!("{:.3}", s.std())),
                        Cell::new(format!("{:.3}", s.median())),
                        Cell::new(format!("[{:.3}, {:.3}]", s.q1(), s.q3())),
                        Cell::new(w),
                    ]);
                }
            }
            println!("Descriptive Statistics");
            println!("{}", groups_table);

            let mut tests_table = Table::new();
            tests_table.set_header(vec![
                "Variable", "Test", "Statistic", "p-value", "Adj. p", "Effect", "Levene p", "",
            ]);
            for variable in &self.variables {
                tests_table.add_row(vec![
                    Cell::new(&variable.name),
                    Cell::new(variable.primary_test),
                    Cell::new(format!("{:.4}", variable.statistic)),
                    Cell::new(format!("{:.4}", variable.p_value)),
                    Cell::new(format!("{:.4}", variable.adjusted_p_value)),
                    Cell::new(variable.effect_label()),
                    Cell::new(format!("{:.4}", variable.levene.p_value())),
                    Cell::new(significance_marker(variable.significant)),
                ]);
            }
            println!("Group Comparisons");
            println!("{}", tests_table);
        }

        if !self.categorical.is_empty() {
            let mut table = Table::new();
            table.set_header(vec!["Variable", "Categories", "Chi²", "df", "p-value", "Adj. p", ""]);
            for variable in &self.categorical {
                table.add_row(vec![
                    Cell::new(&variable.name),
                    Cell::new(variable.test.categories().join(", ")),
                    Cell::new(format!("{:.4}", variable.test.chi2())),
                    Cell::new(variable.test.df()),
                    Cell::new(format!("{:.4}", variable.p_value)),
                    Cell::new(format!("{:.4}", variable.adjusted_p_value)),
                    Cell::new(significance_marker(variable.significant)),
                ]);
            }
            println!("Categorical Association");
            println!("{}", table);
        }

        if !self.correlations.is_empty() {
            let mut table = Table::new();
            table.set_header(vec![
                "Correlation", "N", "Pearson r", "Spearman rho", "p-value", "Adj. p", "",
            ]);
            for correlation in &self.correlations {
                table.add_row(vec![
                    Cell::new(format!(
                        "{} ({} ~ {})",
                        correlation.name, correlation.x_label, correlation.y_label
                    )),
                    Cell::new(correlation.pearson.n()),
                    Cell::new(format!("{:.3}", correlation.pearson.r())),
                    Cell::new(format!("{:.3}", correlation.spearman.r())),
                    Cell::new(format!("{:.4}", correlation.p_value)),
                    Cell::new(format!("{:.4}", correlation.adjusted_p_value)),
                    Cell::new(significance_marker(correlation.significant)),
                ]);
            }
            println!("Correlations");
            println!("{}", table);
        }
    }

    /// Exports the primary test of every entry to a Markdown table.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str("### Experiment Analysis Results\n\n");
        md.push_str("| Name | Test | Statistic | p-value | Adj. p | Effect | Significant |\n");
        md.push_str("|---|---|---|---|---|---|---|\n");

        for v in &self.variables {
            md.push_str(&format!(
                "| {} | {} | {:.4} | {:.4} | {:.4} | {} | {} |\n",
                v.name,
                v.primary_test,
                v.statistic,
                v.p_value,
                v.adjusted_p_value,
                v.effect_label(),
                if v.significant { "yes" } else { "no" }
            ));
        }
        for c in &self.categorical {
            md.push_str(&format!(
                "| {} | {} | {:.4} | {:.4} | {:.4} | - | {} |\n",
                c.name,
                TestKind::ChiSquare,
                c.test.chi2(),
                c.p_value,
                c.adjusted_p_value,
                if c.significant { "yes" } else { "no" }
            ));
        }
        for c in &self.correlations {
            md.push_str(&format!(
                "| {} | {} | {:.4} | {:.4} | {:.4} | rho = {:.3} | {} |\n",
                c.name,
                TestKind::Pearson,
                c.pearson.r(),
                c.p_value,
                c.adjusted_p_value,
                c.spearman.r(),
                if c.significant { "yes" } else { "no" }
            ));
        }
        md
    }

    /// Exports the results to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
