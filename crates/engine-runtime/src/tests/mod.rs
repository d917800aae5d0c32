mod pool;
mod scanner;
