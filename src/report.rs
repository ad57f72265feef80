use std::io::Write;

use crate::data_loader::Competitor;
use crate::format::{format_average_diff, format_ratio_diff, format_time, format_time_diff};
use crate::matchup::{MatchupResult, SegmentKey};
use crate::metrics::AggregateMetric;

// Console rendering of the comparison matrix. Winners get a `*`; everything the
// colour gradient would show on the site is reduced to the gap columns here.

fn segment_label(key: &SegmentKey) -> String {
    if key.is_lap {
        format!("Course {} (lap)", key.course)
    } else {
        format!("Course {}", key.course)
    }
}

fn metric_value(metric: AggregateMetric, value: f64, divisor: f64) -> String {
    match metric {
        AggregateMetric::TotalTime => format_time(value),
        AggregateMetric::AverageFinish | AggregateMetric::AverageStandard => {
            format!("{:.4}", value / divisor)
        }
        AggregateMetric::RecordRatio => format!("{:.4}%", value / divisor * 100.0),
        AggregateMetric::LeaderboardPoints => format!("{value:.0}"),
    }
}

fn metric_diff(metric: AggregateMetric, gap: f64, divisor: f64) -> String {
    match metric {
        AggregateMetric::TotalTime => format_time_diff(gap),
        AggregateMetric::AverageFinish | AggregateMetric::AverageStandard => {
            format_average_diff(gap, divisor)
        }
        AggregateMetric::RecordRatio => format_ratio_diff(gap, divisor),
        AggregateMetric::LeaderboardPoints => format!("{gap:+.0}"),
    }
}

pub fn print_report(result: &MatchupResult, competitors: &[Competitor]) {
    print!("{:20}", "Segment");
    for competitor in competitors {
        print!(" | {:>24}", competitor.name);
    }
    println!();

    for row in &result.segments {
        print!("{:20}", segment_label(&row.key));
        for entry in &row.comparison.entries {
            match entry {
                Some(e) => {
                    let marker = if e.rank == 0 { "*" } else { " " };
                    print!(
                        " | {:>11}{} {:>11}",
                        format_time(e.value),
                        marker,
                        format_time_diff(e.gap_to_best)
                    );
                }
                None => print!(" | {:>24}", "-"),
            }
        }
        println!();
    }

    for row in &result.aggregates {
        print!("{:20}", row.metric.label());
        for entry in &row.comparison.entries {
            match entry {
                Some(e) => {
                    let marker = if e.rank == 0 { "*" } else { " " };
                    print!(
                        " | {:>11}{} {:>11}",
                        metric_value(row.metric, e.value, row.divisor),
                        marker,
                        metric_diff(row.metric, e.gap_to_best, row.divisor)
                    );
                }
                None => print!(" | {:>24}", "-"),
            }
        }
        println!();
    }

    print!("{:20}", "Wins");
    for (idx, wins) in result.win_tally.iter().enumerate() {
        let marker = if result.tally_comparison.winners.contains(&idx) {
            "*"
        } else {
            " "
        };
        let label = if *wins == 1 { "win" } else { "wins" };
        print!(" | {:>18} {label}{marker}", wins);
    }
    println!();
}

/// Writes the comparison matrix as CSV: one row per segment and metric, a time
/// and a gap-to-best column per competitor.
pub fn write_csv<W: Write>(
    result: &MatchupResult,
    competitors: &[Competitor],
    writer: W,
) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["segment".to_string()];
    for competitor in competitors {
        header.push(competitor.name.clone());
        header.push(format!("{} gap", competitor.name));
    }
    csv_writer.write_record(&header)?;

    for row in &result.segments {
        let mut record = vec![segment_label(&row.key)];
        for entry in &row.comparison.entries {
            match entry {
                Some(e) => {
                    record.push(format_time(e.value));
                    record.push(format_time_diff(e.gap_to_best));
                }
                None => {
                    record.push(String::new());
                    record.push(String::new());
                }
            }
        }
        csv_writer.write_record(&record)?;
    }

    for row in &result.aggregates {
        let mut record = vec![row.metric.label().to_string()];
        for entry in &row.comparison.entries {
            match entry {
                Some(e) => {
                    record.push(metric_value(row.metric, e.value, row.divisor));
                    record.push(metric_diff(row.metric, e.gap_to_best, row.divisor));
                }
                None => {
                    record.push(String::new());
                    record.push(String::new());
                }
            }
        }
        csv_writer.write_record(&record)?;
    }

    let mut tally = vec!["wins".to_string()];
    for (wins, entry) in result.win_tally.iter().zip(&result.tally_comparison.entries) {
        tally.push(wins.to_string());
        match entry {
            // Wins behind the leader, negated so trailing competitors read as
            // a deficit. Avoids -0 for the leader.
            Some(e) if e.gap_to_best > 0.0 => tally.push(format!("{:+.0}", -e.gap_to_best)),
            Some(_) => tally.push("+0".to_string()),
            None => tally.push(String::new()),
        }
    }
    csv_writer.write_record(&tally)?;

    csv_writer.flush()?;
    Ok(())
}
