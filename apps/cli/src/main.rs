fn main() -> anyhow::Result<()> {
    kanji_quiz::run()
}
