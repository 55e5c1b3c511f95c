//! Entrant files as text.

/// Header of an entrant file with the default column names.
pub const ENTRANT_HEADER: &str = "dk_name_id,salary,projection,value,max_exposure,probability_top_10,probability_top_30,probability_make_cut";

/// Eight entrants with every optional column filled.
///
/// Exactly four 6-member lineups cost between 49 900 and 50 000. Ranked by
/// projection they are (Scheffler, Rahm, Schauffele, Morikawa, Fleetwood,
/// Hatton), (Scheffler, McIlroy, Schauffele, Morikawa, Lowry, Hatton),
/// (Scheffler, McIlroy, Schauffele, Fleetwood, Lowry, Hatton) and
/// (McIlroy, Rahm, Schauffele, Morikawa, Fleetwood, Hatton).
pub const SAMPLE_POOL: &str = "\
dk_name_id,salary,projection,value,max_exposure,probability_top_10,probability_top_30,probability_make_cut
Scheffler,9500,72.4,6.6,50,0.42,0.71,0.95
McIlroy,9400,66.1,6.4,40,0.31,0.60,0.91
Rahm,9000,63.0,6.4,100,0.25,0.55,0.88
Schauffele,8300,60.2,6.5,100,0.21,0.50,0.87
Morikawa,8000,55.7,6.5,60,0.15,0.42,0.84
Fleetwood,7900,50.3,6.4,100,0.10,0.35,0.80
Lowry,7500,46.8,6.5,100,0.07,0.28,0.76
Hatton,7300,41.9,6.4,100,0.05,0.22,0.71
";

/// Builds an entrant file from data rows under [`ENTRANT_HEADER`].
///
/// ```
/// use lineupforge_test::csv::entrant_csv;
///
/// let text = entrant_csv(&["A,7000,50,5,,,,"]);
/// assert_eq!(text.lines().count(), 2);
/// ```
pub fn entrant_csv(rows: &[&str]) -> String {
    let mut out = String::from(ENTRANT_HEADER);
    for row in rows {
        out.push('\n');
        out.push_str(row);
    }
    out.push('\n');
    out
}
