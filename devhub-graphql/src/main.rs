fn main() -> anyhow::Result<()> {
    devhub_graphql::main()
}
