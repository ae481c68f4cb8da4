//! Schema, indices and write statement for every gazetteer table.
//!
//! Lookups by natural key (alpha-2 code, language code, coordinates) are
//! resolved inside the write statements, so the referenced tables must be
//! loaded first.

use geonames_core::Table;

/// Abbreviations from the alternate names dump.
pub const ABBREVIATION: Table = Table::new(
    "abbreviation",
    "INSERT INTO abbreviation (id, geoname_id, name) VALUES (:id, :geoname_id, :name)",
)
.with_schema(
    "CREATE TABLE IF NOT EXISTS abbreviation (
        id          INTEGER PRIMARY KEY NOT NULL,
        geoname_id  INTEGER             NOT NULL,
        name        TEXT                NOT NULL CHECK (name != ''),

        FOREIGN KEY (geoname_id) REFERENCES geoname (id)
    )",
)
.with_indices(
    "CREATE INDEX IF NOT EXISTS abbreviation_geoname_id_idx ON abbreviation (geoname_id)",
);

/// Administrative division codes, levels 1 to 4.
pub const ADMIN_CODE: Table = Table::new(
    "admin_code",
    "INSERT INTO admin_code (geoname_id, code, level) VALUES (:geoname_id, :code, :level)",
)
.with_schema(
    "CREATE TABLE IF NOT EXISTS admin_code (
        id          INTEGER PRIMARY KEY NOT NULL,
        geoname_id  INTEGER             NOT NULL,
        code        TEXT                NOT NULL CHECK (code != ''),
        level       INTEGER             NOT NULL CHECK (level >= 1 AND level <= 4),

        FOREIGN KEY (geoname_id) REFERENCES geoname (id)
    )",
)
.with_indices(
    "CREATE INDEX IF NOT EXISTS admin_code_geoname_id_idx ON admin_code (geoname_id);
     CREATE INDEX IF NOT EXISTS admin_code_level_idx      ON admin_code (level);",
);

/// IATA, ICAO and similar codes.
pub const AIRPORT_CODE: Table = Table::new(
    "airport_code",
    "INSERT INTO airport_code (id, geoname_id, type, code)
     VALUES (:id, :geoname_id, :type, :code)",
)
.with_schema(
    "CREATE TABLE IF NOT EXISTS airport_code (
        id          INTEGER PRIMARY KEY NOT NULL,
        geoname_id  INTEGER             NOT NULL,
        type        TEXT                NOT NULL,
        code        TEXT                NOT NULL CHECK (code != ''),

        FOREIGN KEY (geoname_id) REFERENCES geoname (id)
    )",
)
.with_indices(
    "CREATE INDEX IF NOT EXISTS airport_code_geoname_id_idx ON airport_code (geoname_id)",
);

/// Extra country codes a place is associated with.
pub const ALTERNATE_COUNTRY_CODE: Table = Table::new(
    "alternate_country_code",
    "INSERT INTO alternate_country_code (geoname_id, country_code_id)
     VALUES (
        :geoname_id,
        (SELECT id FROM country_code WHERE alpha2 = :country_code_alpha2)
     )",
)
.with_schema(
    "CREATE TABLE IF NOT EXISTS alternate_country_code (
        id              INTEGER PRIMARY KEY NOT NULL,
        geoname_id      INTEGER             NOT NULL,
        country_code_id INTEGER             NOT NULL,

        FOREIGN KEY (geoname_id)      REFERENCES geoname (id),
        FOREIGN KEY (country_code_id) REFERENCES country_code (id)
    )",
)
.with_indices(
    "CREATE UNIQUE INDEX IF NOT EXISTS alternate_country_code_geoname_country_code_uniq_idx
        ON alternate_country_code (geoname_id, country_code_id);
     CREATE INDEX IF NOT EXISTS alternate_country_code_geoname_id_idx
        ON alternate_country_code (geoname_id);
     CREATE INDEX IF NOT EXISTS alternate_country_code_country_code_id_idx
        ON alternate_country_code (country_code_id);",
);

/// Names in English or without a language.
pub const ALTERNATE_NAME: Table = Table::new(
    "alternate_name",
    "INSERT INTO alternate_name (
        id, geoname_id, language_code_id, name,
        preferred, short, colloquial, historic, from_period, to_period
     ) VALUES (
        :id,
        :geoname_id,
        (SELECT id FROM language_code
         WHERE code3 = :language_code OR code2 = :language_code OR code1 = :language_code),
        :name,
        :preferred,
        :short,
        :colloquial,
        :historic,
        :from_period,
        :to_period
     )",
)
.with_schema(
    "CREATE TABLE IF NOT EXISTS alternate_name (
        id               INTEGER PRIMARY KEY NOT NULL,
        geoname_id       INTEGER             NOT NULL,
        language_code_id INTEGER,
        name             TEXT                NOT NULL CHECK (name != ''),
        preferred        INTEGER             DEFAULT 0,
        short            INTEGER             DEFAULT 0,
        colloquial       INTEGER             DEFAULT 0,
        historic         INTEGER             DEFAULT 0,
        from_period      TEXT                CHECK (from_period != ''),
        to_period        TEXT                CHECK (to_period != ''),

        FOREIGN KEY (geoname_id)       REFERENCES geoname (id),
        FOREIGN KEY (language_code_id) REFERENCES language_code (id)
    )",
)
.with_indices(
    "CREATE INDEX IF NOT EXISTS alternate_name_geoname_id_idx       ON alternate_name (geoname_id);
     CREATE INDEX IF NOT EXISTS alternate_name_language_code_id_idx ON alternate_name (language_code_id);",
);

/// GeoJSON outlines.
pub const BOUNDARY: Table = Table::new(
    "boundary",
    "INSERT INTO boundary (id, geojson) VALUES (:id, :geojson)",
)
.with_schema(
    "CREATE TABLE IF NOT EXISTS boundary (
        id      INTEGER PRIMARY KEY NOT NULL,
        geojson TEXT                NOT NULL CHECK (geojson != '')
    )",
);

/// Continents keyed by their gazetteer identifier.
pub const CONTINENT: Table = Table::new(
    "continent",
    "INSERT INTO continent (id, code) VALUES (:id, :code)",
)
.with_schema(
    "CREATE TABLE IF NOT EXISTS continent (
        id   INTEGER PRIMARY KEY,
        code TEXT    NOT NULL UNIQUE
    )",
);

/// Countries keyed by their gazetteer identifier.
pub const COUNTRY: Table = Table::new(
    "country",
    "INSERT INTO country (
        id, country_code_id, name, capital, area, population, continent_id,
        tld, currency_code, phone, postal_code_format, postal_code_regex
     ) VALUES (
        :id,
        (SELECT id FROM country_code WHERE alpha2 = :country_code_alpha2),
        :name,
        :capital,
        :area,
        :population,
        (SELECT id FROM continent WHERE code = :continent_code),
        :tld,
        :currency_code,
        :phone,
        :postal_code_format,
        :postal_code_regex
     )",
)
.with_schema(
    "CREATE TABLE IF NOT EXISTS country (
        id                 INTEGER PRIMARY KEY NOT NULL,
        country_code_id    INTEGER             NOT NULL,
        name               TEXT,
        capital            TEXT,
        area               INTEGER             CHECK (area >= 0),
        population         INTEGER             CHECK (population >= 0),
        continent_id       INTEGER,
        tld                TEXT,
        currency_code      TEXT,
        phone              TEXT,
        postal_code_format TEXT,
        postal_code_regex  TEXT,

        FOREIGN KEY (country_code_id) REFERENCES country_code (id),
        FOREIGN KEY (continent_id)    REFERENCES continent (id),
        FOREIGN KEY (currency_code)   REFERENCES currency (code)
    )",
)
.with_indices(
    "CREATE INDEX IF NOT EXISTS country_country_code_id_idx ON country (country_code_id);
     CREATE INDEX IF NOT EXISTS country_continent_id_idx    ON country (continent_id);",
);

/// ISO 3166 codes.
pub const COUNTRY_CODE: Table = Table::new(
    "country_code",
    "INSERT INTO country_code (alpha2, alpha3, numeric) VALUES (:alpha2, :alpha3, :numeric)",
)
.with_schema(
    "CREATE TABLE IF NOT EXISTS country_code (
        id      INTEGER PRIMARY KEY NOT NULL,
        alpha2  TEXT                NOT NULL UNIQUE CHECK (alpha2 != ''),
        alpha3  TEXT                NOT NULL UNIQUE CHECK (alpha3 != ''),
        numeric INTEGER             UNIQUE          CHECK (numeric >= 0)
    )",
);

/// Languages spoken in each country.
pub const COUNTRY_LANGUAGE: Table = Table::new(
    "country_language",
    "INSERT INTO country_language (country_id, language_code_id, country_code_id)
     VALUES (
        :country_id,
        (SELECT id FROM language_code
         WHERE code3 = :language_code OR code2 = :language_code OR code1 = :language_code),
        (SELECT id FROM country_code WHERE alpha2 = :country_code_alpha2)
     )",
)
.with_schema(
    "CREATE TABLE IF NOT EXISTS country_language (
        id               INTEGER PRIMARY KEY NOT NULL,
        country_id       INTEGER             NOT NULL,
        language_code_id INTEGER             NOT NULL,
        country_code_id  INTEGER,

        FOREIGN KEY (language_code_id) REFERENCES language_code (id),
        FOREIGN KEY (country_code_id)  REFERENCES country_code (id)
    )",
)
.with_indices(
    "CREATE INDEX IF NOT EXISTS country_language_language_code_id_idx ON country_language (language_code_id);
     CREATE INDEX IF NOT EXISTS country_language_country_code_id_idx  ON country_language (country_code_id);",
);

/// Bordering countries.
pub const COUNTRY_NEIGHBOR: Table = Table::new(
    "country_neighbor",
    "INSERT INTO country_neighbor (country_id, neighbor_id)
     VALUES (
        :country_id,
        (SELECT country.id
         FROM country
         INNER JOIN country_code ON country.country_code_id = country_code.id
         WHERE country_code.alpha2 = :neighbor_country_code_alpha2)
     )",
)
.with_schema(
    "CREATE TABLE IF NOT EXISTS country_neighbor (
        id          INTEGER PRIMARY KEY NOT NULL,
        country_id  INTEGER             NOT NULL,
        neighbor_id INTEGER             NOT NULL,

        FOREIGN KEY (country_id)  REFERENCES geoname (id),
        FOREIGN KEY (neighbor_id) REFERENCES geoname (id)
    )",
)
.with_indices(
    "CREATE INDEX IF NOT EXISTS country_neighbor_country_id_idx  ON country_neighbor (country_id);
     CREATE INDEX IF NOT EXISTS country_neighbor_neighbor_id_idx ON country_neighbor (neighbor_id);",
);

/// ISO 4217 currencies; repeats are ignored.
pub const CURRENCY: Table = Table::new(
    "currency",
    "INSERT OR IGNORE INTO currency (code, name) VALUES (:code, :name)",
)
.with_schema(
    "CREATE TABLE IF NOT EXISTS currency (
        code TEXT PRIMARY KEY NOT NULL CHECK (code != ''),
        name TEXT             NOT NULL CHECK (name != '')
    ) WITHOUT ROWID",
);

/// The nine feature classes.
pub const FEATURE_CLASS: Table = Table::new(
    "feature_class",
    "INSERT INTO feature_class (id, name, description) VALUES (:id, :name, :description)",
)
.with_schema(
    "CREATE TABLE IF NOT EXISTS feature_class (
        id          TEXT PRIMARY KEY NOT NULL CHECK (id != ''),
        name        TEXT             NOT NULL CHECK (name != ''),
        description TEXT
    )",
)
.with_indices("CREATE INDEX IF NOT EXISTS feature_class_name_idx ON feature_class (name)");

/// Feature codes within their classes.
pub const FEATURE_CODE: Table = Table::new(
    "feature_code",
    "INSERT INTO feature_code (id, class, name, description)
     VALUES (:id, :class, :name, :description)",
)
.with_schema(
    "CREATE TABLE IF NOT EXISTS feature_code (
        id          TEXT PRIMARY KEY NOT NULL CHECK (id != ''),
        class       TEXT             NOT NULL CHECK (class != ''),
        name        TEXT             NOT NULL CHECK (name != ''),
        description TEXT,

        FOREIGN KEY (class) REFERENCES feature_class (id)
    )",
)
.with_indices("CREATE INDEX IF NOT EXISTS feature_code_class_idx ON feature_code (class)");

/// Places. Parents are filled in later from the hierarchy dump.
pub const GEONAME: Table = Table::new(
    "geoname",
    "INSERT INTO geoname (
        id, name, parent_id, location_id, feature_class_id, feature_code_id,
        country_code_id, population, elevation, last_modified
     ) VALUES (
        :id,
        :name,
        NULL,
        (SELECT id FROM location WHERE latitude = :latitude AND longitude = :longitude),
        (SELECT id FROM feature_class WHERE id = :feature_class),
        (SELECT id FROM feature_code WHERE id = :feature_code),
        (SELECT id FROM country_code WHERE alpha2 = :country_code),
        :population,
        :elevation,
        :last_modified
     )",
)
.with_schema(
    "CREATE TABLE IF NOT EXISTS geoname (
        id               INTEGER PRIMARY KEY NOT NULL,
        name             TEXT                CHECK (name != ''),
        parent_id        INTEGER,
        location_id      INTEGER             NOT NULL,
        feature_class_id TEXT,
        feature_code_id  TEXT,
        country_code_id  INTEGER,

        population       INTEGER,
        elevation        INTEGER,

        last_modified    TEXT                CHECK (last_modified != ''),

        FOREIGN KEY (parent_id)        REFERENCES geoname (id),
        FOREIGN KEY (location_id)      REFERENCES location (id),
        FOREIGN KEY (feature_class_id) REFERENCES feature_class (id),
        FOREIGN KEY (feature_code_id)  REFERENCES feature_code (id),
        FOREIGN KEY (country_code_id)  REFERENCES country_code (id)
    )",
)
.with_indices(
    "CREATE INDEX IF NOT EXISTS geoname_parent_id_idx        ON geoname (parent_id);
     CREATE INDEX IF NOT EXISTS geoname_location_id_idx      ON geoname (location_id);
     CREATE INDEX IF NOT EXISTS geoname_feature_class_id_idx ON geoname (feature_class_id);
     CREATE INDEX IF NOT EXISTS geoname_feature_code_id_idx  ON geoname (feature_code_id);
     CREATE INDEX IF NOT EXISTS geoname_country_code_id_idx  ON geoname (country_code_id);
     CREATE INDEX IF NOT EXISTS geoname_last_modified_idx    ON geoname (last_modified);",
);

/// Administrative parent links, applied to `geoname.parent_id`.
pub const HIERARCHY: Table = Table::new(
    "hierarchy",
    "UPDATE geoname SET parent_id = :parent_id WHERE id = :id",
);

/// ISO 639 language codes.
pub const LANGUAGE_CODE: Table = Table::new(
    "language_code",
    "INSERT INTO language_code (code3, code2, code1, name) VALUES (:code3, :code2, :code1, :name)",
)
.with_schema(
    "CREATE TABLE IF NOT EXISTS language_code (
        id    INTEGER PRIMARY KEY NOT NULL,
        code3 TEXT                NOT NULL UNIQUE CHECK (code3 != ''),
        code2 TEXT                UNIQUE          CHECK (code2 != ''),
        code1 TEXT                UNIQUE          CHECK (code1 != ''),
        name  TEXT                NOT NULL UNIQUE CHECK (name != '')
    )",
);

/// Coordinates of each place.
pub const LOCATION: Table = Table::new(
    "location",
    "INSERT INTO location (id, latitude, longitude) VALUES (:id, :latitude, :longitude)",
)
.with_schema(
    "CREATE TABLE IF NOT EXISTS location (
        id        INTEGER PRIMARY KEY NOT NULL,
        latitude  REAL                CHECK (latitude >= -90 AND latitude <= 90),
        longitude REAL                CHECK (longitude >= -180 AND longitude <= 180)
    )",
)
.with_indices(
    "CREATE INDEX IF NOT EXISTS location_latitude_longitude_idx ON location (latitude, longitude)",
);

/// Postal codes from the alternate names dump.
pub const POSTAL_CODE: Table = Table::new(
    "postal_code",
    "INSERT INTO postal_code (id, geoname_id, code) VALUES (:id, :geoname_id, :code)",
)
.with_schema(
    "CREATE TABLE IF NOT EXISTS postal_code (
        id          INTEGER PRIMARY KEY NOT NULL,
        geoname_id  INTEGER             NOT NULL,
        code        TEXT                NOT NULL CHECK (code != ''),

        FOREIGN KEY (geoname_id) REFERENCES geoname (id)
    )",
)
.with_indices(
    "CREATE INDEX IF NOT EXISTS postal_code_geoname_id_idx ON postal_code (geoname_id)",
);

/// Postal code formats and patterns; repeats are ignored.
pub const POSTAL_CODE_SPEC: Table = Table::new(
    "postal_code_spec",
    "INSERT OR IGNORE INTO postal_code_spec (format, regex) VALUES (:format, :regex)",
)
.with_schema(
    "CREATE TABLE IF NOT EXISTS postal_code_spec (
        id     INTEGER PRIMARY KEY NOT NULL,
        format TEXT,
        regex  TEXT
    )",
)
.with_indices(
    "CREATE UNIQUE INDEX IF NOT EXISTS postal_code_spec_format_regex_uniq_idx
        ON postal_code_spec (format, regex)",
);

/// Time zones keyed by IANA name.
pub const TIME_ZONE: Table = Table::new(
    "time_zone",
    "INSERT INTO time_zone (name, country_code_id, gmt_offset, dst_offset, raw_offset)
     VALUES (
        :name,
        (SELECT id FROM country_code WHERE alpha2 = :country_code_alpha2),
        :gmt_offset,
        :dst_offset,
        :raw_offset
     )",
)
.with_schema(
    "CREATE TABLE IF NOT EXISTS time_zone (
        name            TEXT PRIMARY KEY NOT NULL CHECK (name != ''),
        country_code_id INTEGER          NOT NULL,
        gmt_offset      REAL             CHECK (gmt_offset >= -12 AND gmt_offset <= 14),
        dst_offset      REAL             CHECK (dst_offset >= -12 AND dst_offset <= 14),
        raw_offset      REAL             CHECK (raw_offset >= -12 AND raw_offset <= 14),

        FOREIGN KEY (country_code_id) REFERENCES country_code (id)
    ) WITHOUT ROWID",
);

/// Links, usually to Wikipedia.
pub const USER_LINK: Table = Table::new(
    "user_link",
    "INSERT INTO user_link (id, geoname_id, link) VALUES (:id, :geoname_id, :link)",
)
.with_schema(
    "CREATE TABLE IF NOT EXISTS user_link (
        id          INTEGER PRIMARY KEY NOT NULL,
        geoname_id  INTEGER             NOT NULL,
        link        TEXT                NOT NULL CHECK (link != ''),

        FOREIGN KEY (geoname_id) REFERENCES geoname (id)
    )",
)
.with_indices("CREATE INDEX IF NOT EXISTS user_link_geoname_id_idx ON user_link (geoname_id)");

/// User-supplied tags.
pub const USER_TAG: Table = Table::new(
    "user_tag",
    "INSERT INTO user_tag (geoname_id, tag) VALUES (:geoname_id, :tag)",
)
.with_schema(
    "CREATE TABLE IF NOT EXISTS user_tag (
        id          INTEGER PRIMARY KEY NOT NULL,
        geoname_id  INTEGER             NOT NULL,
        tag         TEXT                NOT NULL CHECK (tag != ''),

        FOREIGN KEY (geoname_id) REFERENCES geoname (id)
    )",
)
.with_indices("CREATE INDEX IF NOT EXISTS user_tag_geoname_id_idx ON user_tag (geoname_id)");

/// Wikidata entity identifiers.
pub const WIKIDATA: Table = Table::new(
    "wikidata",
    "INSERT INTO wikidata (id, geoname_id, wikidata_id) VALUES (:id, :geoname_id, :wikidata_id)",
)
.with_schema(
    "CREATE TABLE IF NOT EXISTS wikidata (
        id          INTEGER PRIMARY KEY NOT NULL,
        geoname_id  INTEGER             NOT NULL,
        wikidata_id TEXT                NOT NULL CHECK (wikidata_id != ''),

        FOREIGN KEY (geoname_id) REFERENCES geoname (id)
    )",
)
.with_indices("CREATE INDEX IF NOT EXISTS wikidata_geoname_id_idx ON wikidata (geoname_id)");

/// Every table, in the order the catalogue creates them.
pub const ALL: [Table; 24] = [
    CONTINENT,
    FEATURE_CLASS,
    FEATURE_CODE,
    LANGUAGE_CODE,
    COUNTRY_CODE,
    CURRENCY,
    POSTAL_CODE_SPEC,
    COUNTRY,
    COUNTRY_LANGUAGE,
    TIME_ZONE,
    LOCATION,
    GEONAME,
    ADMIN_CODE,
    ALTERNATE_COUNTRY_CODE,
    HIERARCHY,
    COUNTRY_NEIGHBOR,
    ALTERNATE_NAME,
    ABBREVIATION,
    AIRPORT_CODE,
    POSTAL_CODE,
    USER_LINK,
    WIKIDATA,
    BOUNDARY,
    USER_TAG,
];
