use anyhow::Result;

fn main() -> Result<()> {
    modplan_lib::main()
}
