//! End-to-end coverage across schema parsing, column type resolution, and
//! row conversion, without a live MongoDB connection.

use dump_loader::column_map::get_column_map;
use dump_loader::row::{convert_row, split_tab_fields};
use dump_loader::schema::{find_table, parse_schema};
use dump_loader::DumpPaths;

const ARTIST_SCHEMA: &str = r#"
[
    {
        "create_table": {
            "table_name": "artist",
            "columns": [
                { "column_name": "id", "data_type": "INT" },
                { "column_name": "name", "data_type": "VARCHAR(255)" },
                { "column_name": "begin_date", "data_type": "TIMESTAMP WITH TIME ZONE" },
                { "column_name": "tags", "data_type": "INTEGER[]" },
                { "column_name": "ended", "data_type": "BOOLEAN" }
            ]
        }
    },
    {
        "create_table": {
            "table_name": "place",
            "columns": [
                { "column_name": "id", "data_type": "INT" },
                { "column_name": "coordinates", "data_type": "POINT" }
            ]
        }
    }
]
"#;

#[test]
fn s4_full_dump_row_pipeline_from_schema_to_document() {
    let tables = parse_schema(ARTIST_SCHEMA).unwrap();
    let artist = find_table(&tables, "artist").unwrap();
    let column_map = get_column_map(artist).unwrap();

    let line = "42\tDaft Punk\t1993-01-01 00:00:00+00\t{1,2,3}\tf";
    let fields = split_tab_fields(line);
    let (doc, warnings) = convert_row(&column_map, &fields);

    assert!(warnings.is_empty());
    assert_eq!(doc.get_i64("id").unwrap(), 42);
    assert_eq!(doc.get_str("name").unwrap(), "Daft Punk");
    assert_eq!(doc.get_bool("ended").unwrap(), false);
    assert_eq!(doc.get_array("tags").unwrap().len(), 3);
    assert!(doc.contains_key("begin_date"));
}

#[test]
fn s5_null_markers_propagate_through_the_whole_pipeline() {
    let tables = parse_schema(ARTIST_SCHEMA).unwrap();
    let artist = find_table(&tables, "artist").unwrap();
    let column_map = get_column_map(artist).unwrap();

    let fields = split_tab_fields("7\t\\N\t\\N\t\\N\t\\N");
    let (doc, warnings) = convert_row(&column_map, &fields);

    assert!(warnings.is_empty());
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.get_i64("id").unwrap(), 7);
}

#[test]
fn s6_point_table_round_trips_through_schema() {
    let tables = parse_schema(ARTIST_SCHEMA).unwrap();
    let place = find_table(&tables, "place").unwrap();
    let column_map = get_column_map(place).unwrap();

    let fields = split_tab_fields("1\t(12.5,-7.25)");
    let (doc, warnings) = convert_row(&column_map, &fields);

    assert!(warnings.is_empty());
    let coords = doc.get_array("coordinates").unwrap();
    assert_eq!(coords[0].as_f64().unwrap(), 12.5);
    assert_eq!(coords[1].as_f64().unwrap(), -7.25);
}

#[test]
fn unknown_table_or_type_is_fatal_before_any_row_is_read() {
    let tables = parse_schema(ARTIST_SCHEMA).unwrap();
    assert!(find_table(&tables, "nonexistent").is_err());

    let bad_schema = ARTIST_SCHEMA.replace("INTEGER[]", "BYTEA");
    let tables = parse_schema(&bad_schema).unwrap();
    let artist = find_table(&tables, "artist").unwrap();
    assert!(get_column_map(artist).is_err());
}

#[test]
fn dump_paths_resolve_against_a_real_export_tree() {
    let dir = tempfile::tempdir().unwrap();
    let fullexport_dir = dir
        .path()
        .join("ftp.musicbrainz.org/pub/musicbrainz/data/fullexport");
    std::fs::create_dir_all(&fullexport_dir).unwrap();
    std::fs::write(fullexport_dir.join("LATEST"), "20230701\n").unwrap();

    let mbdump_dir = dir.path().join("data/fullexport/20230701/mbdump");
    std::fs::create_dir_all(&mbdump_dir).unwrap();
    std::fs::write(mbdump_dir.join("artist"), "42\tDaft Punk\n").unwrap();

    let paths = DumpPaths::new(dir.path());
    let latest = paths.read_latest().unwrap();
    assert_eq!(latest, "20230701");

    let dump_file = paths.mbdump_file(&latest, "artist");
    let contents = std::fs::read_to_string(&dump_file).unwrap();
    assert_eq!(contents, "42\tDaft Punk\n");
}
