use archbench::error::AppResult;

fn main() -> AppResult<()> {
    archbench::entry::run()
}
