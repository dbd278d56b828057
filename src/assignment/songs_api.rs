#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::PathBuf;

use chrono::DateTime;

use super::{Assignment, CheckSpec, ItemSpec, SourceFile};

/// Lab name shown in the report title.
pub const LAB_NAME: &str = "songs-api-mongoose-crud";

/// 11/19/2025 11:59 PM Riyadh.
pub const DUE_ISO: &str = "2025-11-19T23:59:00+03:00";

/// Zone label shown next to the due date.
pub const DUE_ZONE: &str = "Riyadh";

/// Required file; its presence decides whether anything was submitted.
pub const REQUIRED_SERVER_PATH: &str = "7-2-restful-api/server/index.js";

/// Model file candidates. The second tolerates a typo in the lab template.
pub const MODEL_PATHS: [&str; 2] = ["server/models/song.model.js", "server/models/song.mode.js"];

/// A labeled check as a static table row.
type Row = (&'static str, &'static [&'static str]);

/// TODO 2: the Song schema and model.
const SCHEMA_MODEL: &[Row] = &[
    ("Imports mongoose", &[
        r#"require\s*\(\s*["'`]mongoose["'`]\s*\)"#,
        r#"import\s+mongoose\s+from\s+["'`]mongoose["'`]"#,
    ]),
    ("Defines a mongoose.Schema", &[
        r"new\s+mongoose\s*\.\s*Schema\s*\(",
        r"mongoose\s*\.\s*Schema\s*\(",
    ]),
    ("Schema includes title field", &[
        r"title\s*:\s*\{\s*type\s*:\s*String",
        r"title\s*:\s*String",
    ]),
    ("title is required", &[r"title\s*:\s*\{[^}]*required\s*:\s*true"]),
    ("Schema includes artist field", &[
        r"artist\s*:\s*\{\s*type\s*:\s*String",
        r"artist\s*:\s*String",
    ]),
    ("artist is required", &[r"artist\s*:\s*\{[^}]*required\s*:\s*true"]),
    ("Schema includes year (Number)", &[
        r"year\s*:\s*\{\s*type\s*:\s*Number",
        r"year\s*:\s*Number",
    ]),
    (r#"Creates & exports model named "Song""#, &[
        r#"mongoose\s*\.\s*model\s*\(\s*["'`]Song["'`]\s*,"#,
        r#"export\s+default\s+mongoose\s*\.\s*model\s*\(\s*["'`]Song["'`]"#,
        r"module\s*\.\s*exports\s*=\s*Song",
        r"exports\s*\.\s*Song\s*=\s*Song",
    ]),
];

/// TODO 3: POST /api/songs.
const CREATE_SONG: &[Row] = &[
    (r#"Defines POST "/api/songs""#, &[
        r#"app\s*\.\s*post\s*\(\s*["'`]/api/songs["'`]\s*,"#,
        r#"router\s*\.\s*post\s*\(\s*["'`]/api/songs["'`]\s*,"#,
    ]),
    ("Uses async handler", &[
        r"app\s*\.\s*post\s*\([^)]*async\s*\(",
        r"router\s*\.\s*post\s*\([^)]*async\s*\(",
    ]),
    ("Reads JSON body (title, artist, year)", &[
        r"req\s*\.body",
        r"const\s*\{\s*title[^}]*artist[^}]*year",
    ]),
    ("Inserts song into DB (Song.create/save)", &[
        r"Song\s*\.\s*create\s*\(",
        r"new\s+Song\s*\(",
        r"\.save\s*\(\s*\)",
    ]),
    ("Responds with 201 + created song JSON", &[
        r"res\s*\.\s*status\s*\(\s*201\s*\)\s*\.\s*json\s*\(",
        r"status\s*\(\s*201\s*\)",
    ]),
    ("On error responds 400 + {message}", &[
        r"catch\s*\(\s*\w+\s*\)\s*\{[\s\S]*status\s*\(\s*400\s*\)\s*\.json",
        r"res\s*\.\s*status\s*\(\s*400\s*\)\s*\.\s*json",
    ]),
];

/// TODO 4: GET /api/songs. The `(Optional)` rows are counted like the others.
const LIST_SONGS: &[Row] = &[
    (r#"Defines GET "/api/songs""#, &[
        r#"app\s*\.\s*get\s*\(\s*["'`]/api/songs["'`]\s*,"#,
        r#"router\s*\.\s*get\s*\(\s*["'`]/api/songs["'`]\s*,"#,
    ]),
    ("Uses Song.find()", &[r"Song\s*\.\s*find\s*\(\s*\)", r"Song\s*\.\s*find\s*\("]),
    ("Sorts newest first (createdAt desc)", &[
        r"\.sort\s*\(\s*\{\s*createdAt\s*:\s*-1\s*\}\s*\)",
        r"\.sort\s*\(\s*\{\s*createdAt\s*:\s*-\s*1\s*\}\s*\)",
    ]),
    ("Returns JSON list", &[r"res\s*\.\s*json\s*\(\s*\w+\s*\)\s*;", r"return\s+res\s*\.\s*json\s*\("]),
    (r#"(Optional) Defines GET "/api/songs/:id""#, &[
        r#"app\s*\.\s*get\s*\(\s*["'`]/api/songs/:id["'`]\s*,"#,
        r#"router\s*\.\s*get\s*\(\s*["'`]/api/songs/:id["'`]\s*,"#,
    ]),
    ("(Optional) Uses Song.findById()", &[
        r"Song\s*\.\s*findById\s*\(\s*req\s*\.\s*params\s*\.\s*id\s*\)",
        r"Song\s*\.\s*findById\s*\(\s*req\.params\.id\s*\)",
        r"Song\s*\.\s*findById\s*\(\s*req\s*\.\s*params\s*\.\s*\w+\s*\)",
    ]),
    (r#"(Optional) 404 {message:"Song not found"} when missing"#, &[
        r#"status\s*\(\s*404\s*\)\s*\.json\s*\(\s*\{\s*message\s*:\s*["'`]Song not found["'`]\s*\}\s*\)"#,
        r"return\s+res\s*\.\s*status\s*\(\s*404\s*\)\s*\.\s*json",
    ]),
];

/// TODO 5: PUT /api/songs/:id.
const UPDATE_SONG: &[Row] = &[
    (r#"Defines PUT "/api/songs/:id""#, &[
        r#"app\s*\.\s*put\s*\(\s*["'`]/api/songs/:id["'`]\s*,"#,
        r#"router\s*\.\s*put\s*\(\s*["'`]/api/songs/:id["'`]\s*,"#,
    ]),
    ("Uses Song.findByIdAndUpdate()", &[r"Song\s*\.\s*findByIdAndUpdate\s*\("]),
    ("Passes { new: true }", &[r"\{\s*new\s*:\s*true"]),
    ("Passes { runValidators: true }", &[r"runValidators\s*:\s*true"]),
    (r#"If not found -> 404 {message:"Song not found"}"#, &[
        r#"return\s+res\s*\.\s*status\s*\(\s*404\s*\)\s*\.\s*json\s*\(\s*\{\s*message\s*:\s*["'`]Song not found["'`]\s*\}\s*\)"#,
        r#"status\s*\(\s*404\s*\)\s*\.json\s*\(\s*\{\s*message\s*:\s*["'`]Song not found["'`]\s*\}\s*\)"#,
    ]),
    ("On validation error -> 400 {message}", &[
        r"catch\s*\(\s*\w+\s*\)\s*\{[\s\S]*status\s*\(\s*400\s*\)\s*\.json",
        r"res\s*\.\s*status\s*\(\s*400\s*\)\s*\.\s*json",
    ]),
];

/// TODO 6: DELETE /api/songs/:id.
const DELETE_SONG: &[Row] = &[
    (r#"Defines DELETE "/api/songs/:id""#, &[
        r#"app\s*\.\s*delete\s*\(\s*["'`]/api/songs/:id["'`]\s*,"#,
        r#"router\s*\.\s*delete\s*\(\s*["'`]/api/songs/:id["'`]\s*,"#,
    ]),
    ("Uses Song.findByIdAndDelete()", &[
        r"Song\s*\.\s*findByIdAndDelete\s*\(\s*req\s*\.\s*params\s*\.\s*id\s*\)",
        r"Song\s*\.\s*findByIdAndDelete\s*\(\s*req\.params\.id\s*\)",
        r"Song\s*\.\s*findByIdAndDelete\s*\(",
    ]),
    (r#"If not found -> 404 {message:"Song not found"}"#, &[
        r#"status\s*\(\s*404\s*\)\s*\.json\s*\(\s*\{\s*message\s*:\s*["'`]Song not found["'`]\s*\}\s*\)"#,
        r"return\s+res\s*\.\s*status\s*\(\s*404\s*\)\s*\.\s*json",
    ]),
    ("On success -> 204 No Content", &[
        r"res\s*\.\s*status\s*\(\s*204\s*\)\s*\.\s*end\s*\(\s*\)",
        r"res\s*\.\s*sendStatus\s*\(\s*204\s*\)",
        r"status\s*\(\s*204\s*\)",
    ]),
];

/// Builds an item from a static table.
fn item(name: &str, max_points: u32, source: SourceFile, rows: &[Row]) -> ItemSpec {
    ItemSpec::builder()
        .name(name)
        .max_points(max_points)
        .source(source)
        .checks(rows.iter().map(|(label, patterns)| {
            CheckSpec::builder()
                .label(*label)
                .patterns(patterns.iter().map(ToString::to_string))
                .build()
        }))
        .build()
}

/// The Songs API lab: five rubric items worth 80 points plus 20 submission
/// points.
pub fn assignment() -> Assignment {
    Assignment::builder()
        .lab_name(LAB_NAME)
        .due(DateTime::parse_from_rfc3339(DUE_ISO).expect("built-in due date is RFC 3339"))
        .due_zone(DUE_ZONE)
        .required_file(REQUIRED_SERVER_PATH)
        .model_files(MODEL_PATHS.into_iter().map(PathBuf::from).collect())
        .items(vec![
            item("TODO 2: Schema & Model (Song)", 15, SourceFile::Model, SCHEMA_MODEL),
            item("TODO 3: POST /api/songs", 15, SourceFile::Required, CREATE_SONG),
            item("TODO 4: GET /api/songs", 15, SourceFile::Required, LIST_SONGS),
            item("TODO 5: PUT /api/songs/:id", 15, SourceFile::Required, UPDATE_SONG),
            item("TODO 6: DELETE /api/songs/:id", 20, SourceFile::Required, DELETE_SONG),
        ])
        .build()
}
