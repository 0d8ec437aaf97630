//! 1..n 求和的三种实现
//!
//! 三个函数在 `n >= 1` 时结果一致; `n <= 0` 时各自保留原有的行为差异。
//! 入参为 `i64`, 结果用 `i128` 承接, 任意 `i64` 输入的和都不会溢出。

/// 高斯公式, O(1)
///
/// `n <= 0` 时直接套公式, 不做截断。
pub fn sum_to_n_a(n: i64) -> i128 {
    let n = i128::from(n);
    n * (n + 1) / 2
}

/// 递归实现, O(n) 调用深度
///
/// 每层一个栈帧, `n` 很大时会栈溢出, 只适合小规模输入。
pub fn sum_to_n_b(n: i64) -> i128 {
    if n <= 1 {
        return i128::from(n);
    }
    i128::from(n) + sum_to_n_b(n - 1)
}

/// 迭代实现, O(n)
pub fn sum_to_n_c(n: i64) -> i128 {
    let mut sum: i128 = 0;
    for i in 1..=n {
        sum += i128::from(i);
    }
    sum
}
