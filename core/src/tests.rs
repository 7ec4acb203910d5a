use super::*;

fn is_valid_date(date: &str) -> bool { date.parse::<ChartDate>().is_ok() }

#[test]
fn test_valid_dates() {
    assert!(is_valid_date("2020-02-29"));
    assert!(is_valid_date("2023-06-10"));
    assert!(is_valid_date("1958-08-04"));
}

#[test]
fn test_invalid_dates() {
    assert!(!is_valid_date("2020-02-30"));
    assert!(!is_valid_date("2021-02-29"));
    assert!(!is_valid_date("2021-13-01"));
    assert!(!is_valid_date("2021-00-10"));
    assert!(!is_valid_date("2021/01/01"));
    assert!(!is_valid_date("01-01-2021"));
    assert!(!is_valid_date("2021-01-01T00:00"));
    assert!(!is_valid_date("yesterday"));
    assert!(!is_valid_date(" 2021-01-01"));
    assert!(!is_valid_date(""));
    assert!(!is_valid_date("+2020-06-10"));
    assert!(!is_valid_date("-2020-06-10"));
    assert!(!is_valid_date("0000-01-01"));
    assert!(!is_valid_date("2020-6-10"));
}

#[test]
fn test_date_display() {
    let date: ChartDate = "2023-06-10".parse().expect("valid date");
    assert_eq!(date.to_string(), "2023-06-10");
    assert_eq!(date.year(), 2023);

    let early: ChartDate = "1999-01-02".parse().expect("valid date");
    assert_eq!(early.to_string(), "1999-01-02");
}

#[test]
fn test_playlist_details() {
    let date: ChartDate = "2023-06-10".parse().unwrap();
    let details = PlaylistDetails::for_chart(&date);

    assert_eq!(details.name, "Billboard Hot 100 - 2023-06-10");
    assert_eq!(details.description, "Billboard Hot 100 songs from 2023-06-10, created automatically.");
    assert!(!details.public);
}

#[test]
fn test_playlist_details_body() {
    let date: ChartDate = "2001-09-01".parse().unwrap();
    let body = serde_json::to_value(PlaylistDetails::for_chart(&date)).unwrap();

    assert_eq!(body["name"], "Billboard Hot 100 - 2001-09-01");
    assert_eq!(body["public"], false);
}
