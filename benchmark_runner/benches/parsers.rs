fn main() {
    benchmark_runner::main();
}
