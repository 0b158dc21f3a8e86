pub const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        offensive BOOLEAN NOT NULL
    );

    CREATE TABLE IF NOT EXISTS fortunes (
        id INTEGER PRIMARY KEY,
        category INTEGER NOT NULL,
        data TEXT NOT NULL,
        FOREIGN KEY (category) REFERENCES categories (id)
    );
";
