/*!
# Language Reference

## Expressions

Numbers are decimal and fit in 16 bits. Values computed at run time are
64 bit integers; a value only wraps when it is stored.

Operators are evaluated with this precedence, highest first. Operators
of equal precedence group from the left.

| operators | meaning |
|-|-|
| `-x` `x^^2` `x++` `x--` | negate, square, increment, decrement |
| `*` `/` `^` | multiply, truncating divide, modulo |
| `+` `-` | add, subtract |
| `=` `!=` `<` `<=` `>` `>=` | comparison, yielding 1 or 0 |
| `->` | store |

Division or modulo by zero stops the program with `DIVISION BY ZERO`.

`expr->A` stores into a variable and yields the stored 16 bit value, so
`3->A->B` sets both. The target of a store may also be memory:
`{p}` is the byte at address `p` and `{p}^^r` the little endian word
at `p` and `p+1`. `o^^A` is the address of variable `A`.

`L1` through `L6` are the addresses of free buffers in calculator RAM.

| buffer | address | bytes |
|-|-|-|
| `L1` | 34540 | 714 |
| `L2` | 35386 | 531 |
| `L3` | 39026 | 768 |
| `L4` | 33445 | 256 |
| `L5` | 34056 | 128 |
| `L6` | 37696 | 768 |

Memory addresses run from 0 to 65534. Reading or writing outside that
range stops the program with `MEMORY FAULT`.

`rand` yields a random number from 0 to 65535. `getKey(n)` yields 1
while key `n` is held. `Pxl-Test(x,y)` yields 1 if the pixel is on.

## Statements

An expression statement must store something: a `->`, `++` or `--` at
its outermost level. Anything else is a syntax error.

| statement | effect |
|-|-|
| `Disp a,b,...` | display each value on its own line |
| `Pause n` | wait `n`/1800 seconds, `n` taken as 0 to 65535 |
| `If c` ... `Else` ... `End` | `Then` after the condition is optional |
| `While c` ... `End` | test before each pass |
| `Repeat c` ... `End` | loop until `c` is true, tested before each pass |
| `For(V,a,b)` ... `End` | `V` counts from `a` to `b` inclusive |
| `For(n)` ... `End` | run the body `n` times |
| `Lbl NAME` | mark a jump target |
| `Goto NAME` | jump, labels may be used before they appear |

A label name is a word, a number or a single letter. Defining the same
label twice is an error, as is jumping to a label that does not exist.
Both are found before the program starts.

## Drawing

The screen is 96 by 64 pixels with the origin at the top left. Every
drawing command takes `^^r` to draw on the back buffer instead.

| command | effect |
|-|-|
| `Pxl-On(x,y)` `Pxl-Off(x,y)` `Pxl-Change(x,y)` | set, clear or flip one pixel |
| `Line(x1,y1,x2,y2)` | line between two points |
| `Rect(x,y,w,h)` | filled rectangle |
| `RectI(x,y,w,h)` | invert a rectangle |
| `Circle(x,y,r)` | circle outline |
| `ClrDraw` | clear the buffer |
| `Horizontal +` `Horizontal -` | shift right or left one pixel |
| `Vertical +` `Vertical -` | shift down or up one pixel |
| `DispGraph` | show the screen |

`DispGraph^^r` mixes both buffers as three level gray and
`DispGraph^^r^^r` as four level gray.

## Meta commands

| command | effect |
|-|-|
| `@EXIT` | stop the program and leave the session |
| `@HELP` | print a summary of the language |
| `@ABOUT` | print the version |
| `@DEBUG expr` | turn instruction tracing on or off |

*/
