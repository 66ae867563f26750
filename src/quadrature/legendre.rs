//! Legendre polynomial recurrences.
//!
//! P_0 = 1, P_1 = x, (k+1) P_{k+1} = (2k+1) x P_k - k P_{k-1}.

/// Evaluate P_n(x).
pub fn legendre(n: usize, x: f64) -> f64 {
    legendre_pair(n, x).1
}

/// Evaluate (P_{n-1}(x), P_n(x)); P_{-1} is taken as 0.
fn legendre_pair(n: usize, x: f64) -> (f64, f64) {
    if n == 0 {
        return (0.0, 1.0);
    }
    let mut p_prev = 1.0;
    let mut p_curr = x;
    for k in 1..n {
        let p_next = ((2 * k + 1) as f64 * x * p_curr - k as f64 * p_prev) / (k + 1) as f64;
        p_prev = p_curr;
        p_curr = p_next;
    }
    (p_prev, p_curr)
}

/// Evaluate P_n(x) and P'_n(x) with one recurrence pass.
///
/// Interior points use P'_n = n (x P_n - P_{n-1}) / (x² - 1); the endpoints
/// use the closed forms P'_n(±1) = (±1)^{n+1} n(n+1)/2.
pub fn legendre_and_derivative(n: usize, x: f64) -> (f64, f64) {
    if n == 0 {
        return (1.0, 0.0);
    }
    let (p_nm1, p_n) = legendre_pair(n, x);
    let nn = (n * (n + 1)) as f64 / 2.0;

    let dp_n = if (x - 1.0).abs() < 1e-14 {
        nn
    } else if (x + 1.0).abs() < 1e-14 {
        if n % 2 == 0 {
            -nn
        } else {
            nn
        }
    } else {
        n as f64 * (x * p_n - p_nm1) / (x * x - 1.0)
    };
    (p_n, dp_n)
}
